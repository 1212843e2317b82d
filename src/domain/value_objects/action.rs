//! Action value object - decides which tool family handles a requested action

use std::fmt;

/// Actions handled by `gcloud app <action>`. Anything else goes to `appcfg.py`.
pub const GCLOUD_ACTIONS: [&str; 4] = ["deploy", "services", "versions", "instances"];

/// Actions after which stale versions may be pruned.
pub const PRUNING_ACTIONS: [&str; 2] = ["deploy", "update"];

/// The external tool family that executes an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    /// `gcloud app ...`
    Gcloud,
    /// Legacy `appcfg.py` from the App Engine SDK
    AppCfg,
}

impl ToolFamily {
    /// Select the family for an action name.
    pub fn for_action(action: &str) -> Self {
        if GCLOUD_ACTIONS.contains(&action) {
            ToolFamily::Gcloud
        } else {
            ToolFamily::AppCfg
        }
    }

    /// Short name used in log lines and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ToolFamily::Gcloud => "gcloud",
            ToolFamily::AppCfg => "appcfg.py",
        }
    }
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a successful run of `action` is followed by version pruning.
pub fn triggers_pruning(action: &str) -> bool {
    PRUNING_ACTIONS.contains(&action)
}
