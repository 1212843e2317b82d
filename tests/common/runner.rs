//! Recording fake for the command runner port

use gae_deploy::{CommandError, CommandRunner};

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Whether the call went through `run_captured`
    pub captured: bool,
}

impl Invocation {
    /// `program` followed by the arguments, space separated
    pub fn line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

/// Records every invocation; never spawns anything.
///
/// Captured stdout and failures are scripted by argument prefix, so a test
/// can answer `app versions list` with a listing or fail `app deploy`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<Invocation>,
    outputs: Vec<(Vec<String>, Vec<u8>)>,
    failures: Vec<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer captured calls whose arguments start with `prefix`
    pub fn with_output(mut self, prefix: &[&str], stdout: impl Into<Vec<u8>>) -> Self {
        self.outputs.push((to_strings(prefix), stdout.into()));
        self
    }

    /// Fail calls whose arguments start with `prefix` with exit status 1
    pub fn failing_on(mut self, prefix: &[&str]) -> Self {
        self.failures.push(to_strings(prefix));
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(Invocation::line).collect()
    }

    /// Calls whose arguments start with `prefix`
    pub fn matching(&self, prefix: &[&str]) -> Vec<&Invocation> {
        self.calls.iter().filter(|call| call.starts_with(prefix)).collect()
    }

    fn record(&mut self, program: &str, args: &[String], captured: bool) -> Result<(), CommandError> {
        let call = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            captured,
        };
        let fails = self
            .failures
            .iter()
            .any(|prefix| call.starts_with(&prefix.iter().map(String::as_str).collect::<Vec<_>>()));
        self.calls.push(call);

        if fails {
            Err(CommandError::Exit {
                program: program.to_string(),
                code: Some(1),
            })
        } else {
            Ok(())
        }
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError> {
        self.record(program, args, false)
    }

    fn run_captured(&mut self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError> {
        self.record(program, args, true)?;
        let stdout = self
            .outputs
            .iter()
            .find(|(prefix, _)| args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, p)| a == p))
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default();
        Ok(stdout)
    }
}

fn to_strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| token.to_string()).collect()
}
