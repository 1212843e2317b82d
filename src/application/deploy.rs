//! Deploy Use Case
//!
//! Orchestrates one deployment:
//! 1. Activate the service account key with `gcloud auth`
//! 2. Select the tool family for the action (fetching an access token for
//!    `appcfg.py`)
//! 3. Materialize the auxiliary files the tool reads
//! 4. Run the tool
//! 5. Prune stale versions when configured
//!
//! Every step is sequential and any failure aborts the rest.

use crate::config::DeploymentConfig;
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::{triggers_pruning, ToolFamily};
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::fs::materialize;
use crate::infrastructure::tools::{AppCfgTool, DeployTool, GcloudTool};

use super::prune::{prune_versions, PruneReport};
use super::token::acquire_access_token;

/// Outcome of a successful deployment
#[derive(Debug, Clone, PartialEq)]
pub struct DeployReport {
    pub family: ToolFamily,
    /// `None` when pruning was not requested for this run
    pub pruned: Option<PruneReport>,
}

/// Deploy use case, parameterized by the command runner port
pub struct DeployUseCase<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> DeployUseCase<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Execute the full pipeline for `config`
    pub fn execute(&mut self, config: &DeploymentConfig) -> DeployResult<DeployReport> {
        self.activate_service_account(config)?;

        let family = ToolFamily::for_action(&config.action);
        let tool = self.select_tool(family, config)?;
        self.run_tool(tool.as_ref(), config)?;

        let pruned = if config.max_versions > 0 && triggers_pruning(&config.action) {
            Some(prune_versions(&mut self.runner, config)?)
        } else {
            None
        };

        Ok(DeployReport { family, pruned })
    }

    fn activate_service_account(&mut self, config: &DeploymentConfig) -> DeployResult<()> {
        let args = vec![
            "auth".to_string(),
            "activate-service-account".to_string(),
            "--key-file".to_string(),
            config.key_path.display().to_string(),
        ];
        self.runner
            .run(&config.tools.gcloud, &args)
            .map_err(DeployError::Activate)
    }

    fn select_tool(&mut self, family: ToolFamily, config: &DeploymentConfig) -> DeployResult<Box<dyn DeployTool>> {
        match family {
            ToolFamily::Gcloud => Ok(Box::new(GcloudTool)),
            ToolFamily::AppCfg => {
                let token = acquire_access_token(&mut self.runner, &config.tools.gcloud)
                    .map_err(DeployError::AccessToken)?;
                Ok(Box::new(AppCfgTool::new(&token)))
            }
        }
    }

    fn run_tool(&mut self, tool: &dyn DeployTool, config: &DeploymentConfig) -> DeployResult<()> {
        let args = tool.command_args(config);

        for &role in tool.aux_files() {
            materialize(
                &config.working_dir,
                role,
                config.aux_files.source(role),
                &config.template_vars,
            )
            .map_err(|source| DeployError::Materialize { role, source })?;
        }

        self.runner
            .run(tool.program(config), &args)
            .map_err(|source| DeployError::Deploy {
                tool: tool.name(),
                source,
            })
    }
}
