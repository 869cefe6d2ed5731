//! Line-oriented adapter over a structured [`Logger`]
//!
//! [`StandardLog`] lets code written against a classic "print a line"
//! logger, a [`std::io::Write`] sink or the `log` crate macros feed records
//! into the structured engine.

use crate::core::{
    caller::Caller,
    context::Context,
    error::Result,
    level::Level,
    logger::Logger,
    record::Record,
};
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

/// Options for [`standard_log`]
#[derive(Debug, Clone, Default)]
pub struct StandardLogOptions {
    /// Logger to bind. Default: the process-wide default logger
    pub logger: Option<Logger>,
    /// Level of every emitted record. Default: [`Level::Info`] for lines;
    /// `log` crate records keep their own level unless this is set
    pub force_level: Option<Level>,
    /// Prefix rendered instead of the bound logger's prefix.
    ///
    /// Setting it binds the adapter to a copy of the logger's settings taken
    /// when the adapter is built, so later setter calls on that logger (for
    /// example `set_output(.., None)` on the default) do not reach it.
    pub prefix: Option<String>,
}

impl StandardLogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub fn force_level(mut self, level: Level) -> Self {
        self.force_level = Some(level);
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Legacy line logger bound to a structured logger's handler
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let buf = SharedBuffer::new();
/// let logger = Logger::builder().output(buf.clone()).build();
/// let std_log = standard_log(StandardLogOptions::new().logger(logger));
///
/// std_log.println("legacy line\n");
/// assert_eq!(buf.contents(), "INFO legacy line\n");
/// ```
#[derive(Debug)]
pub struct StandardLog {
    logger: Logger,
    force_level: Option<Level>,
    pending: Vec<u8>,
}

/// Build a [`StandardLog`]; with no explicit logger this initializes the
/// default one.
pub fn standard_log(options: StandardLogOptions) -> StandardLog {
    let logger = options.logger.unwrap_or_else(crate::global::default);
    let logger = match options.prefix {
        Some(prefix) => logger.with_prefix(&prefix),
        None => logger,
    };
    StandardLog {
        logger,
        force_level: options.force_level,
        pending: Vec::new(),
    }
}

impl StandardLog {
    /// The logger records are sent to
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Level used for lines written through this adapter
    pub fn level(&self) -> Level {
        self.force_level.unwrap_or(Level::Info)
    }

    /// Emit one record; a single trailing newline is dropped
    #[track_caller]
    pub fn println(&self, line: &str) {
        self.emit_line(line, Location::caller());
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit_line(&args.to_string(), Location::caller());
    }

    fn emit_line(&self, line: &str, location: &'static Location<'static>) {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);
        let level = self.level();
        let ctx = Context::background();
        if !self.logger.enabled(&ctx, level) {
            self.logger.metrics().record_filtered();
            return;
        }
        self.logger
            .dispatch(&ctx, Record::new(Some(level), line), location);
    }

    /// Emit whatever partial line is buffered
    fn drain_pending(&mut self, location: &'static Location<'static>) {
        if self.pending.is_empty() {
            return;
        }
        let bytes = std::mem::take(&mut self.pending);
        self.emit_line(&String::from_utf8_lossy(&bytes), location);
    }

    /// Register this adapter as the `log` crate's global logger
    pub fn install(self) -> Result<()> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    fn record_level(&self, level: log::Level) -> Level {
        self.force_level.unwrap_or_else(|| level.into())
    }
}

impl Write for StandardLog {
    /// Each complete line becomes one record; a trailing partial line is
    /// kept until the next newline or `flush`.
    #[track_caller]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let location = Location::caller();
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit_line(&String::from_utf8_lossy(&line), location);
        }
        Ok(buf.len())
    }

    #[track_caller]
    fn flush(&mut self) -> io::Result<()> {
        self.drain_pending(Location::caller());
        self.logger
            .flush()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

impl Drop for StandardLog {
    fn drop(&mut self) {
        self.drain_pending(Location::caller());
    }
}

impl log::Log for StandardLog {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger
            .enabled(&Context::background(), self.record_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = self.record_level(record.level());
        let ctx = Context::background();
        if !self.logger.enabled(&ctx, level) {
            self.logger.metrics().record_filtered();
            return;
        }

        let mut entry = Record::new(Some(level), record.args().to_string());
        let file = record
            .file_static()
            .map(Cow::Borrowed)
            .or_else(|| record.file().map(|f| Cow::Owned(f.to_string())));
        if let (Some(file), Some(line)) = (file, record.line()) {
            entry = entry.with_caller(Caller::new(file, line));
        }
        self.logger.dispatch(&ctx, entry, Location::caller());
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handler::Configurable;
    use crate::core::sink::SharedBuffer;

    fn adapter(options: StandardLogOptions) -> (StandardLog, SharedBuffer) {
        let buf = SharedBuffer::new();
        let logger = Logger::builder().output(buf.clone()).build();
        (standard_log(options.logger(logger)), buf)
    }

    #[test]
    fn test_println_defaults_to_info() {
        let (std_log, buf) = adapter(StandardLogOptions::new());
        std_log.println("test message\n");
        assert_eq!(buf.contents(), "INFO test message\n");
        assert_eq!(std_log.level(), Level::Info);
    }

    #[test]
    fn test_force_level() {
        let (std_log, buf) = adapter(StandardLogOptions::new().force_level(Level::Error));
        std_log.printf(format_args!("code {}", 500));
        assert_eq!(buf.contents(), "ERROR code 500\n");
    }

    #[test]
    fn test_forced_level_below_threshold_is_dropped() {
        let (std_log, buf) = adapter(StandardLogOptions::new().force_level(Level::Debug));
        std_log.println("quiet");
        assert!(buf.is_empty());
        assert_eq!(std_log.logger().metrics().filtered_count(), 1);
    }

    #[test]
    fn test_prefix_replaces_logger_prefix() {
        let (std_log, buf) = adapter(StandardLogOptions::new().prefix("legacy"));
        std_log.println("hello");
        assert_eq!(buf.contents(), "INFO legacy: hello\n");
    }

    #[test]
    fn test_bound_logger_reconfiguration_applies() {
        let buf = SharedBuffer::new();
        let logger = Logger::builder().output(buf.clone()).build();
        let std_log = standard_log(StandardLogOptions::new().logger(logger.clone()));
        logger.handler().set_level(Level::Warn);
        std_log.println("dropped");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_io_write_splits_lines() {
        let (mut std_log, buf) = adapter(StandardLogOptions::new());
        write!(std_log, "first\nsec").unwrap();
        writeln!(std_log, "ond").unwrap();
        std_log.write_all(b"tail").unwrap();
        assert_eq!(buf.lines(), vec!["INFO first", "INFO second"]);

        std_log.flush().unwrap();
        assert_eq!(buf.lines(), vec!["INFO first", "INFO second", "INFO tail"]);
    }

    #[test]
    fn test_drop_emits_partial_line() {
        let (mut std_log, buf) = adapter(StandardLogOptions::new());
        std_log.write_all(b"unterminated").unwrap();
        drop(std_log);
        assert_eq!(buf.contents(), "INFO unterminated\n");
    }

    #[test]
    fn test_log_crate_record() {
        use log::Log;

        let (std_log, buf) = adapter(StandardLogOptions::new());
        std_log.logger().handler().set_report_caller(true);
        std_log.log(
            &log::Record::builder()
                .args(format_args!("from log {}", 1))
                .level(log::Level::Warn)
                .file_static(Some("src/net/conn.rs"))
                .line(Some(88))
                .build(),
        );
        std_log.log(
            &log::Record::builder()
                .args(format_args!("trace noise"))
                .level(log::Level::Trace)
                .build(),
        );
        assert_eq!(buf.contents(), "WARN <net/conn.rs:88> from log 1\n");
    }

    #[test]
    fn test_log_crate_enabled_respects_forced_level() {
        use log::Log;

        let (std_log, _buf) = adapter(StandardLogOptions::new().force_level(Level::Error));
        let metadata = log::Metadata::builder().level(log::Level::Trace).build();
        assert!(std_log.enabled(&metadata));
    }
}
