//! Configuration for gae-deploy
//!
//! Parameters come from exactly one source, chosen in this order:
//! 1. A TOML file passed with `--config`
//! 2. Drone 0.5+ environment variables (`DRONE_WORKSPACE` is set)
//! 3. Drone 0.4 JSON on stdin
//!
//! Raw parameters are then validated into an immutable [`DeploymentConfig`].

mod loader;
mod types;
mod validate;

pub use loader::{from_env, from_json_reader, from_toml_file, load, ConfigWarning};
pub use types::{AuxFileOverrides, DeploymentConfig, PluginInput, RawParams, ToolPaths};
pub use validate::{
    sanitize_version, validate, Validated, DEFAULT_APPCFG_CMD, DEFAULT_GCLOUD_CMD, DEFAULT_KEY_PATH,
};

use thiserror::Error;

/// Errors raised while loading or validating parameters
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A JSON-encoded parameter did not have the expected shape
    #[error("could not parse param {param} into a {expected}")]
    InvalidParam {
        param: &'static str,
        expected: &'static str,
    },

    /// A required parameter is empty
    #[error("missing required param: {0}")]
    MissingParam(&'static str),

    /// No project parameter and none in the service account key
    #[error("project id not found in token or param")]
    MissingProject,

    /// Neither the Drone environment nor piped stdin provided parameters
    #[error("no plugin parameters: DRONE_WORKSPACE is not set and stdin is a terminal")]
    NoInput,

    /// Drone 0.4 stdin payload could not be decoded
    #[error("invalid plugin input on stdin: {0}")]
    Stdin(#[source] serde_json::Error),

    /// TOML config file could not be parsed
    #[error("invalid config file {path}: {message}")]
    File {
        path: std::path::PathBuf,
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
