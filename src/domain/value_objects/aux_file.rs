//! Auxiliary configuration files App Engine expects under fixed names

use std::fmt;

/// Role of an auxiliary descriptor in the deployment directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxFile {
    /// Primary application descriptor
    App,
    /// Scheduled tasks
    Cron,
    /// Request routing rules
    Dispatch,
    /// Task queues
    Queue,
}

impl AuxFile {
    /// Every role, in materialization order
    pub const ALL: [AuxFile; 4] = [AuxFile::App, AuxFile::Cron, AuxFile::Dispatch, AuxFile::Queue];

    /// The file name the platform tooling reads
    pub fn platform_name(&self) -> &'static str {
        match self {
            AuxFile::App => "app.yaml",
            AuxFile::Cron => "cron.yaml",
            AuxFile::Dispatch => "dispatch.yaml",
            AuxFile::Queue => "queue.yaml",
        }
    }

    /// Logical role name used in error messages
    pub fn role(&self) -> &'static str {
        match self {
            AuxFile::App => "app",
            AuxFile::Cron => "cron",
            AuxFile::Dispatch => "dispatch",
            AuxFile::Queue => "queue",
        }
    }
}

impl fmt::Display for AuxFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.role())
    }
}
