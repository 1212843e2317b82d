//! Infrastructure layer
//!
//! Concrete adapters behind the domain ports:
//! - `process`: the process-backed `CommandRunner`
//! - `tools`: argument builders for `gcloud` and `appcfg.py`
//! - `fs`: auxiliary file materialization and the credential key file

pub mod fs;
pub mod process;
pub mod tools;
