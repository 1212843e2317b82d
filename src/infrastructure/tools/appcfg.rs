//! `appcfg.py` argument builder

use super::{push_addl_args, DeployTool};
use crate::config::DeploymentConfig;
use crate::domain::value_objects::{AuxFile, ToolFamily};

/// The legacy tool family, authenticated with a short-lived access token
#[derive(Debug, Clone)]
pub struct AppCfgTool {
    access_token: String,
}

impl AppCfgTool {
    /// `access_token` is the raw output of `gcloud auth print-access-token`;
    /// surrounding whitespace is trimmed.
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: access_token.trim().to_string(),
        }
    }
}

impl DeployTool for AppCfgTool {
    fn family(&self) -> ToolFamily {
        ToolFamily::AppCfg
    }

    fn program<'a>(&self, config: &'a DeploymentConfig) -> &'a str {
        &config.tools.appcfg
    }

    fn aux_files(&self) -> &'static [AuxFile] {
        &[AuxFile::App, AuxFile::Cron]
    }

    fn build_args(&self, config: &DeploymentConfig) -> Vec<String> {
        let mut args = vec![
            "--oauth2_access_token".to_string(),
            self.access_token.clone(),
            "-A".to_string(),
            config.project.clone(),
        ];

        if let Some(version) = &config.version {
            args.push("-V".to_string());
            args.push(version.clone());
        }

        for (key, value) in &config.ae_environment {
            args.push("-E".to_string());
            args.push(format!("{key}:{value}"));
        }

        push_addl_args(&mut args, config);

        // positional: action and app directory must be last
        args.push(config.action.clone());
        args.push(".".to_string());

        args
    }
}
