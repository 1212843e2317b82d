//! Domain Ports (Interfaces)
//!
//! The only boundary the domain needs is running an external program.
//! Infrastructure provides the process-backed implementation; tests provide
//! recording fakes.

pub mod command_runner;

pub use command_runner::{CommandError, CommandRunner};
