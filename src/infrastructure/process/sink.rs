//! Output sinks for child processes and the command log

use std::fmt;
use std::io::{self, Read, Write};
use std::process::Stdio;

/// Destination for a stream of output
pub enum Sink {
    /// The parent's own stream
    Inherit,
    /// Discard everything
    Null,
    /// Collect in memory
    Buffer(Vec<u8>),
    /// Forward to an arbitrary writer
    Writer(Box<dyn Write + Send>),
}

impl Sink {
    pub fn buffer() -> Self {
        Sink::Buffer(Vec::new())
    }

    /// Contents collected so far, for `Buffer` sinks
    pub fn buffered(&self) -> Option<&[u8]> {
        match self {
            Sink::Buffer(buf) => Some(buf),
            _ => None,
        }
    }

    /// How the child's stream should be wired
    pub(crate) fn stdio(&self) -> Stdio {
        match self {
            Sink::Inherit => Stdio::inherit(),
            Sink::Null => Stdio::null(),
            Sink::Buffer(_) | Sink::Writer(_) => Stdio::piped(),
        }
    }

    /// Copy a piped child stream into this sink until EOF
    pub(crate) fn pump(&mut self, reader: &mut dyn Read) -> io::Result<u64> {
        match self {
            Sink::Buffer(buf) => io::copy(reader, buf),
            Sink::Writer(writer) => {
                let copied = io::copy(reader, writer)?;
                writer.flush()?;
                Ok(copied)
            }
            Sink::Inherit | Sink::Null => Ok(0),
        }
    }

    /// Write one line; `Inherit` means the process's stdout
    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Sink::Inherit => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{line}")?;
                stdout.flush()
            }
            Sink::Null => Ok(()),
            Sink::Buffer(buf) => writeln!(buf, "{line}"),
            Sink::Writer(writer) => {
                writeln!(writer, "{line}")?;
                writer.flush()
            }
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Inherit => f.write_str("Inherit"),
            Sink::Null => f.write_str("Null"),
            Sink::Buffer(buf) => write!(f, "Buffer({} bytes)", buf.len()),
            Sink::Writer(_) => f.write_str("Writer"),
        }
    }
}
