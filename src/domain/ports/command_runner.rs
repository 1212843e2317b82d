//! Command Runner Port
//!
//! Abstracts running an external program so the deploy and prune use cases can
//! be exercised without `gcloud` installed.

use thiserror::Error;

/// Failure of a single external invocation
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and reported failure
    #[error("{program} exited with {}", describe_exit(.code))]
    Exit { program: String, code: Option<i32> },

    /// Forwarding the program's output failed
    #[error("error forwarding output of {program}: {source}")]
    Output {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Runs external programs synchronously, one at a time.
pub trait CommandRunner {
    /// Run `program` with `args`, streaming its output to the runner's sinks.
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError>;

    /// Run `program` with `args` and return what it wrote to stdout.
    ///
    /// The runner's regular stdout sink is restored before this returns,
    /// whether or not the program succeeded.
    fn run_captured(&mut self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError> {
        (**self).run(program, args)
    }

    fn run_captured(&mut self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError> {
        (**self).run_captured(program, args)
    }
}
