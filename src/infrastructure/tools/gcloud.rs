//! `gcloud app` argument builder

use super::{push_addl_args, DeployTool, APP_YAML_ARG};
use crate::config::DeploymentConfig;
use crate::domain::value_objects::{AuxFile, ToolFamily};

/// The modern tool family: `gcloud app <action> ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct GcloudTool;

impl DeployTool for GcloudTool {
    fn family(&self) -> ToolFamily {
        ToolFamily::Gcloud
    }

    fn program<'a>(&self, config: &'a DeploymentConfig) -> &'a str {
        &config.tools.gcloud
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["app"]
    }

    fn aux_files(&self) -> &'static [AuxFile] {
        &AuxFile::ALL
    }

    fn build_args(&self, config: &DeploymentConfig) -> Vec<String> {
        let mut args = vec![config.action.clone()];

        // complex calls like `gcloud app services set-traffic ...`
        args.extend(config.sub_commands.iter().filter(|cmd| !cmd.is_empty()).cloned());

        args.push(APP_YAML_ARG.to_string());

        if let Some(version) = &config.version {
            args.push("--version".to_string());
            args.push(version.clone());
        }

        if let Some(image) = &config.flex_image {
            args.push("--image-url".to_string());
            args.push(image.clone());
        }

        args.push("--project".to_string());
        args.push(config.project.clone());

        // never prompt
        args.push("--quiet".to_string());

        push_addl_args(&mut args, config);

        args.extend(config.addl_flags.iter().filter(|flag| !flag.is_empty()).cloned());

        args
    }
}
