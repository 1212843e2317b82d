//! Process execution
//!
//! `Environ` runs external programs with a fixed working directory and
//! environment, logging a redacted command line before each one.

mod capture;
mod environ;
mod sink;

pub use capture::StdoutCapture;
pub use environ::Environ;
pub use sink::Sink;
