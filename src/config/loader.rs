//! Parameter loading from the Drone environment, stdin, or a TOML file

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use is_terminal::IsTerminal;
use serde::Deserialize;

use super::types::{PluginInput, RawParams};
use super::ConfigError;

/// Non-fatal configuration warning surfaced to users (e.g. a misspelled key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the unknown key
    pub key: String,
    /// Where the key was found
    pub origin: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring unknown key '{}' in {}", self.key, self.origin)
    }
}

/// Load parameters from whichever source is present.
pub fn load(config_file: Option<&Path>) -> Result<(PluginInput, Vec<ConfigWarning>), ConfigError> {
    if let Some(path) = config_file {
        return from_toml_file(path);
    }

    let drone_workspace = std::env::var("DRONE_WORKSPACE").unwrap_or_default();
    if !drone_workspace.is_empty() {
        let input = from_env(|name| std::env::var(name).ok())?;
        return Ok((input, Vec::new()));
    }

    let stdin = std::io::stdin();
    // Reading a terminal would block forever waiting for a payload
    if stdin.is_terminal() {
        return Err(ConfigError::NoInput);
    }
    from_json_reader(stdin.lock())
}

/// Read Drone 0.5+ plugin parameters through `lookup` (normally `std::env::var`).
pub fn from_env<F>(lookup: F) -> Result<PluginInput, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).unwrap_or_default();

    let mut params = RawParams {
        project: get("PLUGIN_PROJECT"),
        action: get("PLUGIN_ACTION"),
        // secrets are not prefixed
        token: get("GAE_CREDENTIALS"),
        version: get("PLUGIN_VERSION"),
        flex_image: get("PLUGIN_FLEX_IMAGE"),
        app_file: get("PLUGIN_APP_FILE"),
        cron_file: get("PLUGIN_CRON_FILE"),
        dispatch_file: get("PLUGIN_DISPATCH_FILE"),
        queue_file: get("PLUGIN_QUEUE_FILE"),
        dir: get("PLUGIN_DIR"),
        appcfg_cmd: get("PLUGIN_APPCFG_CMD"),
        gcloud_cmd: get("PLUGIN_GCLOUD_CMD"),
        max_versions: get("PLUGIN_MAX_VERSIONS").trim().parse().unwrap_or(0),
        // values containing commas cannot be expressed
        addl_flags: split_list(&get("PLUGIN_ADDL_FLAGS")),
        sub_commands: split_list(&get("PLUGIN_SUB_COMMANDS")),
        ..RawParams::default()
    };

    let addl_args = get("PLUGIN_ADDL_ARGS");
    if !addl_args.is_empty() {
        params.addl_args = serde_json::from_str(&addl_args).map_err(|_| ConfigError::InvalidParam {
            param: "addl_args",
            expected: "map[string]string",
        })?;
    }

    let ae_environment = get("PLUGIN_AE_ENVIRONMENT");
    if !ae_environment.is_empty() {
        let mut env: HashMap<String, String> =
            serde_json::from_str(&ae_environment).map_err(|_| ConfigError::InvalidParam {
                param: "ae_environment",
                expected: "map[string]string",
            })?;
        for value in env.values_mut() {
            expand_in_place(value, &lookup);
        }
        params.ae_environment = env;
    }

    let vars = get("PLUGIN_VARS");
    if !vars.is_empty() {
        params.vars = serde_json::from_str(&vars).map_err(|_| ConfigError::InvalidParam {
            param: "vars",
            expected: "map[string]interface{}",
        })?;
        for value in params.vars.values_mut() {
            if let serde_json::Value::String(s) = value {
                expand_in_place(s, &lookup);
            }
        }
    }

    Ok(PluginInput {
        workspace: PathBuf::from(get("DRONE_WORKSPACE")),
        params,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Drone04Payload {
    workspace: Drone04Workspace,
    vargs: RawParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Drone04Workspace {
    path: PathBuf,
}

/// Read a Drone 0.4 payload: `{"workspace": {"path": ...}, "vargs": {...}}`.
pub fn from_json_reader<R: Read>(reader: R) -> Result<(PluginInput, Vec<ConfigWarning>), ConfigError> {
    let mut unknown = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let payload: Drone04Payload = serde_ignored::deserialize(&mut deserializer, |path| {
        unknown.push(path.to_string());
    })
    .map_err(ConfigError::Stdin)?;
    deserializer.end().map_err(ConfigError::Stdin)?;

    let warnings = warnings_for(unknown, "stdin");
    Ok((
        PluginInput {
            workspace: payload.workspace.path,
            params: payload.vargs,
        },
        warnings,
    ))
}

/// Read parameters from a TOML file.
///
/// The file holds the plugin parameters as top-level keys plus an optional
/// `workspace`, which defaults to the current directory.
pub fn from_toml_file(path: &Path) -> Result<(PluginInput, Vec<ConfigWarning>), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let invalid = |message: String| ConfigError::File {
        path: path.to_path_buf(),
        message,
    };

    let mut table: toml::Table = toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    let workspace = match table.remove("workspace") {
        Some(toml::Value::String(dir)) => PathBuf::from(dir),
        Some(other) => {
            return Err(invalid(format!(
                "workspace must be a string, found {}",
                other.type_str()
            )))
        }
        None => std::env::current_dir()?,
    };

    let mut unknown = Vec::new();
    let params: RawParams = serde_ignored::deserialize(toml::Value::Table(table), |p| {
        unknown.push(p.to_string());
    })
    .map_err(|e| invalid(e.to_string()))?;

    let warnings = warnings_for(unknown, &path.display().to_string());
    Ok((PluginInput { workspace, params }, warnings))
}

fn warnings_for(unknown: Vec<String>, origin: &str) -> Vec<ConfigWarning> {
    unknown
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            origin: origin.to_string(),
        })
        .collect()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Expand $VAR references; a value that expands to nothing is kept verbatim.
fn expand_in_place<F>(value: &mut String, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = shellexpand::env_with_context_no_errors(value.as_str(), |name: &str| lookup(name)).into_owned();
    if !expanded.is_empty() {
        *value = expanded;
    }
}
