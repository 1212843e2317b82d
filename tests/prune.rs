//! Version pruning after deploy.
//!
//! Run with: cargo test --test prune

mod common;

use common::*;
use gae_deploy::{prune_versions, DeployError, DeployUseCase, ServiceIdentity};

const LIST: &[&str] = &["app", "versions", "list"];
const DELETE: &[&str] = &["app", "versions", "delete"];

#[test]
fn deletes_everything_outside_the_window_in_one_call() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.version = Some("v3".to_string());
    config.max_versions = 2;

    let runner = RecordingRunner::new().with_output(LIST, LISTING_IDLE);
    let mut use_case = DeployUseCase::new(runner);
    let report = use_case.execute(&config).unwrap();

    let pruned = report.pruned.unwrap();
    assert_eq!(pruned.service, ServiceIdentity::new("default"));
    assert_eq!(pruned.listed.len(), 4);
    assert_eq!(pruned.deleted, vec!["v1", "v0"]);

    let runner = use_case.into_runner();
    let list = runner.matching(LIST);
    assert_eq!(list.len(), 1);
    assert!(list[0].captured);
    assert_eq!(
        list[0].line(),
        "gcloud app versions list --service default --project acme-prod --format json --sort-by ~version.createTime --quiet"
    );

    let delete = runner.matching(DELETE);
    assert_eq!(delete.len(), 1);
    assert_eq!(
        delete[0].line(),
        "gcloud app versions delete --service default --project acme-prod --quiet v1 v0"
    );
}

#[test]
fn serving_versions_survive_outside_the_window() {
    let dir = workdir(&[("app.yaml", API_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.version = Some("v3".to_string());
    config.max_versions = 1;

    let mut runner = RecordingRunner::new().with_output(LIST, LISTING_SERVING_V2);
    let report = prune_versions(&mut runner, &config).unwrap();

    assert_eq!(report.service.as_str(), "api");
    assert_eq!(report.deleted, vec!["v1", "v0"]);
    assert_eq!(
        runner.matching(DELETE)[0].args,
        vec!["app", "versions", "delete", "--service", "api", "--project", "acme-prod", "--quiet", "v1", "v0"]
    );
}

#[test]
fn deployed_version_survives_outside_the_window() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.version = Some("v1".to_string());
    config.max_versions = 1;

    let mut runner = RecordingRunner::new().with_output(LIST, LISTING_IDLE);
    let report = prune_versions(&mut runner, &config).unwrap();

    assert_eq!(report.deleted, vec!["v2", "v0"]);
}

#[test]
fn nothing_to_delete_makes_no_delete_call() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 5;

    let mut runner = RecordingRunner::new().with_output(LIST, LISTING_SERVING_V2);
    let report = prune_versions(&mut runner, &config).unwrap();

    assert!(report.deleted.is_empty());
    assert_eq!(runner.calls.len(), 1);
    assert!(runner.matching(DELETE).is_empty());
}

#[test]
fn empty_listing_is_not_an_error() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 1;

    let mut runner = RecordingRunner::new().with_output(LIST, "\n");
    let report = prune_versions(&mut runner, &config).unwrap();

    assert!(report.listed.is_empty());
    assert!(runner.matching(DELETE).is_empty());
}

#[test]
fn legacy_module_key_names_the_service() {
    let dir = workdir(&[("app.yaml", WORKER_MODULE_YAML)]);
    let mut config = config("update", dir.path());
    config.max_versions = 3;

    let mut runner = RecordingRunner::new().with_output(LIST, "[]");
    let report = prune_versions(&mut runner, &config).unwrap();

    assert_eq!(report.service.as_str(), "worker");
    assert!(runner.calls[0].args.contains(&"worker".to_string()));
}

#[test]
fn listing_failure_after_a_successful_deploy() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 2;

    let runner = RecordingRunner::new().failing_on(LIST);
    let mut use_case = DeployUseCase::new(runner);
    let err = use_case.execute(&config).unwrap_err();

    assert!(matches!(err, DeployError::ListVersions(_)));
    assert_eq!(err.to_string(), "error listing versions: gcloud exited with status 1");
    // the deploy itself already happened
    assert_eq!(use_case.runner().matching(&["app", "deploy"]).len(), 1);
}

#[test]
fn malformed_listing_is_a_decode_error() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 2;

    let mut runner = RecordingRunner::new().with_output(LIST, "Listed 0 items.");
    let err = prune_versions(&mut runner, &config).unwrap_err();

    assert!(matches!(err, DeployError::DecodeVersions(_)));
}

#[test]
fn delete_failure_is_reported() {
    let dir = workdir(&[("app.yaml", DEFAULT_APP_YAML)]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 1;

    let mut runner = RecordingRunner::new()
        .with_output(LIST, LISTING_IDLE)
        .failing_on(DELETE);
    let err = prune_versions(&mut runner, &config).unwrap_err();

    assert_eq!(err.to_string(), "error deleting versions: gcloud exited with status 1");
}

#[test]
fn missing_app_yaml_is_reported_with_its_path() {
    let dir = workdir(&[]);
    let mut config = config("deploy", dir.path());
    config.max_versions = 1;

    let mut runner = RecordingRunner::new();
    let err = prune_versions(&mut runner, &config).unwrap_err();

    assert!(matches!(err, DeployError::ReadAppFile { .. }));
    assert!(err.to_string().contains("app.yaml"));
    assert!(runner.calls.is_empty());
}
