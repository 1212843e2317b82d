//! Scoped stdout redirection

use std::mem;

use super::environ::Environ;
use super::sink::Sink;
use crate::domain::ports::CommandError;

/// Holds an [`Environ`] whose stdout is redirected into memory.
///
/// The previous sink is put back when the guard is dropped or consumed with
/// [`StdoutCapture::into_bytes`], including on early return through `?`.
#[derive(Debug)]
pub struct StdoutCapture<'a> {
    environ: &'a mut Environ,
    saved: Option<Sink>,
}

impl<'a> StdoutCapture<'a> {
    pub(super) fn new(environ: &'a mut Environ) -> Self {
        let saved = mem::replace(&mut environ.stdout, Sink::buffer());
        Self {
            environ,
            saved: Some(saved),
        }
    }

    /// Run a command with stdout going to the capture buffer.
    pub fn run(&mut self, program: &str, args: &[String]) -> Result<(), CommandError> {
        self.environ.run(program, args)
    }

    /// Restore the original sink and return everything captured.
    pub fn into_bytes(mut self) -> Vec<u8> {
        match self.restore() {
            Some(Sink::Buffer(captured)) => captured,
            _ => Vec::new(),
        }
    }

    fn restore(&mut self) -> Option<Sink> {
        let saved = self.saved.take()?;
        Some(mem::replace(&mut self.environ.stdout, saved))
    }
}

impl Drop for StdoutCapture<'_> {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::ports::CommandRunner;

    fn environ() -> Environ {
        Environ::new("/tmp", Vec::new())
            .with_stdout(Sink::buffer())
            .with_log(Sink::Null)
    }

    fn echo(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn captured_output_does_not_reach_original_sink() {
        let mut env = environ();

        let captured = {
            let mut capture = env.capture_stdout();
            capture.run("/bin/echo", &echo("[]")).unwrap();
            capture.into_bytes()
        };

        assert_eq!(captured, b"[]\n");
        assert_eq!(env.stdout().buffered(), Some(&b""[..]));
    }

    #[test]
    fn sink_is_restored_when_command_fails() {
        let mut env = environ();

        let result = env.run_captured("/bin/sh", &["-c".to_string(), "echo partial; exit 1".to_string()]);
        assert!(result.is_err());

        env.run("/bin/echo", &echo("after")).unwrap();
        assert_eq!(env.stdout().buffered(), Some(&b"after\n"[..]));
    }

    #[test]
    fn sink_is_restored_when_guard_is_dropped() {
        let mut env = environ();
        {
            let mut capture = env.capture_stdout();
            capture.run("/bin/echo", &echo("lost")).unwrap();
        }
        env.run("/bin/echo", &echo("kept")).unwrap();
        assert_eq!(env.stdout().buffered(), Some(&b"kept\n"[..]));
    }
}
