//! Value objects - small immutable types with no identity

mod action;
mod aux_file;

pub use action::{triggers_pruning, ToolFamily, GCLOUD_ACTIONS, PRUNING_ACTIONS};
pub use aux_file::AuxFile;
