//! Configuration type definitions

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Deserializer};

use crate::domain::value_objects::AuxFile;

/// Plugin parameters as supplied by the CI system, before validation.
///
/// Field names follow the plugin's public parameter names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawParams {
    /// Any `appcfg.py` action or `gcloud app` command group
    pub action: String,
    /// Extra `key value` argument pairs
    pub addl_args: HashMap<String, String>,
    /// Extra valueless flags
    pub addl_flags: Vec<String>,
    /// Version label, sanitized during validation
    pub version: String,
    /// `appcfg.py -E` environment injections
    pub ae_environment: HashMap<String, String>,
    /// Extra `gcloud app <action>` tokens (e.g. `instances delete ...`)
    pub sub_commands: Vec<String>,
    /// Image for flexible environment deploys
    pub flex_image: String,
    /// Template variables for the auxiliary YAML files
    pub vars: BTreeMap<String, serde_json::Value>,
    pub app_file: String,
    /// Keep this many newest versions after deploy (0 or negative disables pruning)
    #[serde(deserialize_with = "count_or_zero")]
    pub max_versions: usize,
    pub cron_file: String,
    pub dispatch_file: String,
    pub queue_file: String,
    /// Application directory relative to the workspace
    pub dir: String,
    /// Google Cloud project id
    pub project: String,
    /// Service account JSON key
    pub token: String,
    pub gcloud_cmd: String,
    pub appcfg_cmd: String,
}

// Negative counts mean "none"
fn count_or_zero<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value).unwrap_or(0))
}

/// Raw parameters plus the CI workspace they apply to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginInput {
    pub workspace: PathBuf,
    pub params: RawParams,
}

/// Alternate source names for the auxiliary files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuxFileOverrides {
    pub app: Option<String>,
    pub cron: Option<String>,
    pub dispatch: Option<String>,
    pub queue: Option<String>,
}

impl AuxFileOverrides {
    /// The user-supplied source for `role`, if any
    pub fn source(&self, role: AuxFile) -> Option<&str> {
        match role {
            AuxFile::App => self.app.as_deref(),
            AuxFile::Cron => self.cron.as_deref(),
            AuxFile::Dispatch => self.dispatch.as_deref(),
            AuxFile::Queue => self.queue.as_deref(),
        }
    }
}

/// Locations of the two deployment tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub gcloud: String,
    pub appcfg: String,
}

/// Fully validated deployment configuration.
///
/// Invariants: `project` is non-empty; `version`, when present, is a
/// lowercase token safe for file names and URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentConfig {
    pub action: String,
    pub project: String,
    pub version: Option<String>,
    pub flex_image: Option<String>,
    pub addl_args: HashMap<String, String>,
    pub addl_flags: Vec<String>,
    pub sub_commands: Vec<String>,
    pub ae_environment: HashMap<String, String>,
    pub template_vars: BTreeMap<String, serde_json::Value>,
    pub aux_files: AuxFileOverrides,
    pub tools: ToolPaths,
    /// Directory every command runs in (`workspace/dir`)
    pub working_dir: PathBuf,
    /// Number of newest versions to keep; 0 disables pruning
    pub max_versions: usize,
    /// Where the service account key is written for `gcloud auth`
    pub key_path: PathBuf,
}

impl DeploymentConfig {
    /// Minimal configuration for `action` against `project`, with default tools.
    pub fn new(action: impl Into<String>, project: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            action: action.into(),
            project: project.into(),
            version: None,
            flex_image: None,
            addl_args: HashMap::new(),
            addl_flags: Vec::new(),
            sub_commands: Vec::new(),
            ae_environment: HashMap::new(),
            template_vars: BTreeMap::new(),
            aux_files: AuxFileOverrides::default(),
            tools: ToolPaths {
                gcloud: super::DEFAULT_GCLOUD_CMD.to_string(),
                appcfg: super::DEFAULT_APPCFG_CMD.to_string(),
            },
            working_dir: working_dir.into(),
            max_versions: 0,
            key_path: PathBuf::from(super::validate::DEFAULT_KEY_PATH),
        }
    }

    /// Path of an auxiliary file under its platform name
    pub fn aux_path(&self, role: AuxFile) -> PathBuf {
        self.working_dir.join(role.platform_name())
    }
}
