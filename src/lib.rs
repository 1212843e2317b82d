//! gae-deploy - App Engine deployment for CI pipelines
//!
//! Translates a validated deployment configuration into an ordered sequence of
//! `gcloud` or `appcfg.py` invocations, runs them, and optionally prunes stale
//! versions of the deployed service afterwards.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{acquire_access_token, prune_versions, DeployReport, DeployUseCase, PruneReport};
pub use config::{ConfigError, ConfigWarning, DeploymentConfig};
pub use domain::entities::{ServiceIdentity, VersionRecord};
pub use domain::ports::{CommandError, CommandRunner};
pub use domain::services::{redact_args, RetentionPolicy};
pub use domain::value_objects::{AuxFile, ToolFamily};
pub use error::{DeployError, DeployResult};
pub use infrastructure::process::{Environ, Sink};
