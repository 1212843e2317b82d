//! Version pruning
//!
//! After a deploy, lists the service's versions newest first, applies the
//! retention policy, and deletes the rest in a single call.

use crate::config::DeploymentConfig;
use crate::domain::entities::{parse_listing, ServiceIdentity, VersionRecord};
use crate::domain::ports::CommandRunner;
use crate::domain::services::RetentionPolicy;
use crate::domain::value_objects::AuxFile;
use crate::error::{DeployError, DeployResult};

/// Outcome of a pruning pass
#[derive(Debug, Clone, PartialEq)]
pub struct PruneReport {
    pub service: ServiceIdentity,
    /// Versions returned by the listing, newest first
    pub listed: Vec<VersionRecord>,
    /// Versions deleted, in listing order
    pub deleted: Vec<String>,
}

/// Delete versions of the deployed service outside the retention window.
///
/// Reads the service from the already materialized app.yaml. Any listing or
/// deletion failure aborts the pass; the deploy itself is never rolled back.
pub fn prune_versions<R>(runner: &mut R, config: &DeploymentConfig) -> DeployResult<PruneReport>
where
    R: CommandRunner + ?Sized,
{
    let service = read_service(config)?;
    let gcloud = config.tools.gcloud.as_str();

    let list_args = to_args(&[
        "app",
        "versions",
        "list",
        "--service",
        service.as_str(),
        "--project",
        &config.project,
        "--format",
        "json",
        "--sort-by",
        "~version.createTime",
        "--quiet",
    ]);
    let stdout = runner
        .run_captured(gcloud, &list_args)
        .map_err(DeployError::ListVersions)?;
    let listed = parse_listing(&stdout)?;

    let policy = RetentionPolicy::new(config.max_versions);
    let deleted = policy.select_for_deletion(&listed, config.version.as_deref());

    if deleted.is_empty() {
        log::info!(
            "all {} versions of service {} retained, nothing to delete",
            listed.len(),
            service
        );
        return Ok(PruneReport {
            service,
            listed,
            deleted,
        });
    }

    log::info!("deleting {} versions: {}", deleted.len(), deleted.join(", "));

    let mut delete_args = to_args(&[
        "app",
        "versions",
        "delete",
        "--service",
        service.as_str(),
        "--project",
        &config.project,
        "--quiet",
    ]);
    delete_args.extend(deleted.iter().cloned());
    runner
        .run(gcloud, &delete_args)
        .map_err(DeployError::DeleteVersions)?;

    Ok(PruneReport {
        service,
        listed,
        deleted,
    })
}

fn read_service(config: &DeploymentConfig) -> DeployResult<ServiceIdentity> {
    let path = config.aux_path(AuxFile::App);
    let content = std::fs::read_to_string(&path).map_err(|source| DeployError::ReadAppFile {
        path: path.clone(),
        source,
    })?;
    ServiceIdentity::from_app_yaml(&content).map_err(|source| DeployError::ParseAppFile { path, source })
}

fn to_args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}
