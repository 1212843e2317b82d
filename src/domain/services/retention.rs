//! Version retention policy
//!
//! Keeps the N newest versions, the version just deployed, and anything that
//! is serving traffic. Everything else is stale.

use crate::domain::entities::VersionRecord;

/// "Keep N newest" retention rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    keep: usize,
}

impl RetentionPolicy {
    /// `keep == 0` disables pruning
    pub fn new(keep: usize) -> Self {
        Self { keep }
    }

    pub fn keep(&self) -> usize {
        self.keep
    }

    pub fn is_enabled(&self) -> bool {
        self.keep > 0
    }

    /// Whether the version at `position` (0 = newest) survives.
    pub fn retains(&self, position: usize, version: &VersionRecord, deployed: Option<&str>) -> bool {
        position < self.keep || deployed == Some(version.id.as_str()) || version.is_serving()
    }

    /// Ids of the versions to delete, in listing order.
    ///
    /// `versions` must be ordered newest first.
    pub fn select_for_deletion(&self, versions: &[VersionRecord], deployed: Option<&str>) -> Vec<String> {
        versions
            .iter()
            .enumerate()
            .filter(|(position, version)| !self.retains(*position, version, deployed))
            .map(|(_, version)| version.id.clone())
            .collect()
    }
}
