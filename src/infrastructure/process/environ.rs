//! Process-backed command runner

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::capture::StdoutCapture;
use super::sink::Sink;
use crate::domain::ports::{CommandError, CommandRunner};
use crate::domain::services::redact_args;

/// Execution environment shared by every command of a deployment
///
/// Commands run one at a time, in `dir`, with exactly the variables in `env`.
#[derive(Debug)]
pub struct Environ {
    dir: PathBuf,
    env: Vec<(String, String)>,
    pub(super) stdout: Sink,
    stderr: Sink,
    log: Sink,
}

impl Environ {
    /// Runner that forwards output to this process's own streams
    pub fn new(dir: impl Into<PathBuf>, env: Vec<(String, String)>) -> Self {
        Self {
            dir: dir.into(),
            env,
            stdout: Sink::Inherit,
            stderr: Sink::Inherit,
            log: Sink::Inherit,
        }
    }

    pub fn with_stdout(mut self, sink: Sink) -> Self {
        self.stdout = sink;
        self
    }

    pub fn with_stderr(mut self, sink: Sink) -> Self {
        self.stderr = sink;
        self
    }

    /// Where `Running Command:` lines go
    pub fn with_log(mut self, sink: Sink) -> Self {
        self.log = sink;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stdout(&self) -> &Sink {
        &self.stdout
    }

    pub fn stderr(&self) -> &Sink {
        &self.stderr
    }

    pub fn log(&self) -> &Sink {
        &self.log
    }

    /// Redirect stdout into memory until the returned guard is dropped.
    ///
    /// The guard borrows the runner exclusively, so nothing else can run
    /// while the sink is swapped.
    pub fn capture_stdout(&mut self) -> StdoutCapture<'_> {
        StdoutCapture::new(self)
    }

    /// Log the redacted command line, then run `program` to completion.
    pub fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError> {
        let line = format!("Running Command: {} {}", program, redact_args(args));
        if let Err(err) = self.log.write_line(&line) {
            log::warn!("unable to write command log line: {err}");
        }

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.dir)
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(self.stdout.stdio())
            .stderr(self.stderr.stdio())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let child_stdout = child.stdout.take();
        let child_stderr = child.stderr.take();
        let Environ { stdout, stderr, .. } = self;

        // Drain both pipes concurrently so neither can fill and block the child
        let pumped = std::thread::scope(|scope| -> io::Result<()> {
            let stderr_pump = child_stderr.map(|mut pipe| {
                scope.spawn(move || stderr.pump(&mut pipe as &mut dyn Read))
            });
            let stdout_result = match child_stdout {
                Some(mut pipe) => stdout.pump(&mut pipe as &mut dyn Read).map(|_| ()),
                None => Ok(()),
            };
            let stderr_result = match stderr_pump {
                Some(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(io::Error::other("stderr forwarding panicked")))
                    .map(|_| ()),
                None => Ok(()),
            };
            stdout_result.and(stderr_result)
        });

        let status = child.wait().map_err(|source| CommandError::Output {
            program: program.to_string(),
            source,
        })?;

        pumped.map_err(|source| CommandError::Output {
            program: program.to_string(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Exit {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}

impl CommandRunner for Environ {
    fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError> {
        Environ::run(self, program, args)
    }

    fn run_captured(&mut self, program: &str, args: &[String]) -> Result<Vec<u8>, CommandError> {
        let mut capture = self.capture_stdout();
        capture.run(program, args)?;
        Ok(capture.into_bytes())
    }
}
