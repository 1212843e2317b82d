//! Filesystem adapters

mod key_file;
mod materialize;

pub use key_file::KeyFile;
pub use materialize::{materialize, render, MaterializeError};
