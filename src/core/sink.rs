//! Output destinations
//!
//! A [`Sink`] is a cheaply cloned handle to a writer shared by every logger
//! that writes to it. Each record is written with a single `write_all`
//! under the sink's lock, so lines from concurrent loggers never interleave.

use super::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    terminal: bool,
    name: &'static str,
}

impl Sink {
    /// Wrap any writer. Output to it is never colored.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            terminal: false,
            name: "writer",
        }
    }

    pub fn stderr() -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(io::stderr()))),
            terminal: io::stderr().is_terminal(),
            name: "stderr",
        }
    }

    pub fn stdout() -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
            terminal: io::stdout().is_terminal(),
            name: "stdout",
        }
    }

    /// Append to the file at `path`, creating it if needed
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;
        Ok(Self {
            writer: Arc::new(Mutex::new(Box::new(file))),
            terminal: false,
            name: "file",
        })
    }

    /// Whether ANSI styling may be emitted to this sink
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Whether both handles write to the same underlying writer
    pub fn ptr_eq(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.writer, &other.writer)
    }

    pub fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::writer(format!("{} sink: {}", self.name, e)))
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

impl Default for Sink {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("name", &self.name)
            .field("terminal", &self.terminal)
            .finish()
    }
}

/// An in-memory writer whose clones share one buffer.
///
/// Useful for capturing log output in tests:
///
/// ```
/// use rust_log_facade::{Logger, SharedBuffer};
///
/// let buf = SharedBuffer::new();
/// let logger = Logger::builder().output(buf.clone()).build();
/// logger.info("captured");
/// assert!(buf.contents().contains("captured"));
/// ```
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
