//! Domain entities

mod service;
mod version;

pub use service::ServiceIdentity;
pub use version::{parse_listing, VersionRecord};
