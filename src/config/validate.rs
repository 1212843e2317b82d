//! Parameter validation - turns [`PluginInput`] into a [`DeploymentConfig`]

use std::path::Path;

use serde::Deserialize;

use super::types::{AuxFileOverrides, DeploymentConfig, PluginInput, ToolPaths};
use super::ConfigError;

pub const DEFAULT_GCLOUD_CMD: &str = "gcloud";
pub const DEFAULT_APPCFG_CMD: &str = "/go_appengine/appcfg.py";
pub const DEFAULT_KEY_PATH: &str = "/tmp/gcloud.json";

/// Validated configuration plus the credential it was validated against
#[derive(Debug, Clone)]
pub struct Validated {
    pub config: DeploymentConfig,
    /// Trimmed service account key
    pub token: String,
}

#[derive(Deserialize)]
struct ServiceAccountKey {
    #[serde(default)]
    project_id: String,
}

/// Validate raw parameters and apply defaults.
///
/// The key file is written to `key_path` by the caller.
pub fn validate(input: PluginInput, key_path: &Path) -> Result<Validated, ConfigError> {
    let PluginInput { workspace, params } = input;

    // forgive the vagaries of YAML parsing
    let token = params.token.trim().to_string();
    if token.is_empty() {
        return Err(ConfigError::MissingParam("token"));
    }

    let project = if params.project.is_empty() {
        project_from_token(&token).ok_or(ConfigError::MissingProject)?
    } else {
        params.project
    };

    if params.action.is_empty() {
        return Err(ConfigError::MissingParam("action"));
    }

    let config = DeploymentConfig {
        action: params.action,
        project,
        version: non_empty(params.version).map(|v| sanitize_version(&v)),
        flex_image: non_empty(params.flex_image),
        addl_args: params.addl_args,
        addl_flags: params.addl_flags,
        sub_commands: params.sub_commands,
        ae_environment: params.ae_environment,
        template_vars: params.vars,
        aux_files: AuxFileOverrides {
            app: non_empty(params.app_file),
            cron: non_empty(params.cron_file),
            dispatch: non_empty(params.dispatch_file),
            queue: non_empty(params.queue_file),
        },
        tools: ToolPaths {
            gcloud: non_empty(params.gcloud_cmd).unwrap_or_else(|| DEFAULT_GCLOUD_CMD.to_string()),
            appcfg: non_empty(params.appcfg_cmd).unwrap_or_else(|| DEFAULT_APPCFG_CMD.to_string()),
        },
        working_dir: workspace.join(&params.dir),
        max_versions: params.max_versions,
        key_path: key_path.to_path_buf(),
    };

    Ok(Validated { config, token })
}

/// Make a version label safe for App Engine: `/`, `|` and `.` become `-`,
/// then everything is lowercased.
pub fn sanitize_version(version: &str) -> String {
    version
        .chars()
        .map(|c| if matches!(c, '/' | '|' | '.') { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}

fn project_from_token(token: &str) -> Option<String> {
    serde_json::from_str::<ServiceAccountKey>(token)
        .ok()
        .map(|key| key.project_id)
        .filter(|id| !id.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
