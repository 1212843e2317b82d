//! Common test utilities for gae-deploy integration tests.
//!
//! This module provides:
//! - `RecordingRunner`: a `CommandRunner` that records invocations instead of
//!   spawning processes, with scripted stdout and failures
//! - Fixtures: reusable descriptor and listing content

#![allow(dead_code)]

pub mod fixtures;
pub mod runner;

pub use fixtures::*;
pub use runner::*;
