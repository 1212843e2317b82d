//! Deployed version entity

use serde::Deserialize;

/// One deployed version of a service, as reported by `gcloud app versions list`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VersionRecord {
    /// Version identifier
    pub id: String,
    /// Fraction of live traffic routed to this version (0.0 to 1.0)
    #[serde(default)]
    pub traffic_split: f64,
}

impl VersionRecord {
    pub fn new(id: impl Into<String>, traffic_split: f64) -> Self {
        Self {
            id: id.into(),
            traffic_split,
        }
    }

    /// A version receiving any live traffic must not be deleted
    pub fn is_serving(&self) -> bool {
        self.traffic_split > 0.0
    }
}

/// Parse a JSON version listing, preserving its order.
///
/// `gcloud` prints nothing at all for a service without versions, which is
/// treated as an empty listing.
pub fn parse_listing(stdout: &[u8]) -> Result<Vec<VersionRecord>, serde_json::Error> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(stdout)
}
