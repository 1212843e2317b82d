//! Test fixtures - reusable content for deploy tests.

use std::fs;
use std::path::Path;

use gae_deploy::DeploymentConfig;
use tempfile::TempDir;

/// Standard environment app.yaml for the default service
pub const DEFAULT_APP_YAML: &str = "runtime: go\napi_version: go1\n";

/// app.yaml for a named service
pub const API_APP_YAML: &str = "service: api\nruntime: go122\n";

/// Legacy descriptor naming the service with `module`
pub const WORKER_MODULE_YAML: &str = "module: worker\nruntime: python27\n";

pub const CRON_YAML: &str = "cron:\n- description: nightly\n  url: /tasks/nightly\n  schedule: every 24 hours\n";

/// `app versions list --format json` output, newest first:
/// v3, v2 (serving 100%), v1, v0
pub const LISTING_SERVING_V2: &str = r#"[
  {"id": "v3", "traffic_split": 0.0, "service": "default"},
  {"id": "v2", "traffic_split": 1.0, "service": "default"},
  {"id": "v1", "traffic_split": 0.0, "service": "default"},
  {"id": "v0", "traffic_split": 0.0, "service": "default"}
]"#;

/// Same ids with no traffic anywhere
pub const LISTING_IDLE: &str = r#"[
  {"id": "v3", "traffic_split": 0},
  {"id": "v2", "traffic_split": 0},
  {"id": "v1", "traffic_split": 0},
  {"id": "v0", "traffic_split": 0}
]"#;

/// A temp working directory containing `files`
pub fn workdir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        write(dir.path(), name, content);
    }
    dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// Deploy config for `acme-prod` rooted at `dir`
pub fn config(action: &str, dir: &Path) -> DeploymentConfig {
    DeploymentConfig::new(action, "acme-prod", dir)
}
