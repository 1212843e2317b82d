//! Application layer - use cases
//!
//! - `deploy`: activate credentials, run the selected tool, prune
//! - `prune`: delete stale versions of the deployed service
//! - `token`: fetch an OAuth access token for `appcfg.py`

mod deploy;
mod prune;
mod token;

pub use deploy::{DeployReport, DeployUseCase};
pub use prune::{prune_versions, PruneReport};
pub use token::acquire_access_token;
