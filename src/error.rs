//! Error types for gae-deploy
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::CommandError;
use crate::domain::value_objects::AuxFile;
use crate::infrastructure::fs::MaterializeError;

/// Result type alias for deployment operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for a deployment run
///
/// Every variant aborts the remaining pipeline steps.
#[derive(Error, Debug)]
pub enum DeployError {
    /// `gcloud auth activate-service-account` failed
    #[error("error activating service account: {0}")]
    Activate(#[source] CommandError),

    /// `gcloud auth print-access-token` failed
    #[error("error creating access token: {0}")]
    AccessToken(#[source] CommandError),

    /// The primary deploy command failed
    #[error("error running {tool}: {source}")]
    Deploy {
        tool: &'static str,
        #[source]
        source: CommandError,
    },

    /// An auxiliary file could not be copied or rendered
    #[error("error setting up {role} file: {source}")]
    Materialize {
        role: AuxFile,
        #[source]
        source: MaterializeError,
    },

    /// app.yaml could not be read for the service lookup
    #[error("error reading {path}: {source}")]
    ReadAppFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// app.yaml is not valid YAML
    #[error("error parsing {path}: {source}")]
    ParseAppFile {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// `gcloud app versions list` failed
    #[error("error listing versions: {0}")]
    ListVersions(#[source] CommandError),

    /// The version listing was not the expected JSON
    #[error(transparent)]
    DecodeVersions(#[from] serde_json::Error),

    /// `gcloud app versions delete` failed
    #[error("error deleting versions: {0}")]
    DeleteVersions(#[source] CommandError),

    /// Parameters could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),
}
