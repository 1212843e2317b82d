//! Deployment tool strategies
//!
//! Each tool family knows which program to run, which auxiliary files it
//! reads, and how to lay out its arguments.

mod appcfg;
mod gcloud;

pub use appcfg::AppCfgTool;
pub use gcloud::GcloudTool;

use crate::config::DeploymentConfig;
use crate::domain::value_objects::{AuxFile, ToolFamily};

/// Path of the primary descriptor as passed to `gcloud`
pub const APP_YAML_ARG: &str = "./app.yaml";

/// Strategy for invoking one deployment tool family
pub trait DeployTool {
    /// The family this tool implements
    fn family(&self) -> ToolFamily;

    /// Name of this tool (for logging and errors)
    fn name(&self) -> &'static str {
        self.family().name()
    }

    /// Program to execute
    fn program<'a>(&self, config: &'a DeploymentConfig) -> &'a str;

    /// Tokens placed before the built arguments (e.g. `app` for `gcloud app`)
    fn prefix(&self) -> &'static [&'static str] {
        &[]
    }

    /// Auxiliary files that must be in place before the tool runs
    fn aux_files(&self) -> &'static [AuxFile];

    /// The ordered arguments for `config`
    fn build_args(&self, config: &DeploymentConfig) -> Vec<String>;

    /// Full argument vector: prefix followed by the built arguments
    fn command_args(&self, config: &DeploymentConfig) -> Vec<String> {
        self.prefix()
            .iter()
            .map(|token| token.to_string())
            .chain(self.build_args(config))
            .collect()
    }
}

/// Append `key value` for every additional argument pair.
///
/// Map iteration order is unspecified; each pair stays adjacent.
pub(crate) fn push_addl_args(args: &mut Vec<String>, config: &DeploymentConfig) {
    for (key, value) in &config.addl_args {
        args.push(key.clone());
        args.push(value.clone());
    }
}
