//! Logger options
//!
//! [`Options`] is the fully resolved configuration record a [`Logger`] is
//! built from. [`LoggerBuilder`] applies option units to it: every method
//! sets exactly one field, so a later call for the same field overrides an
//! earlier one and unrelated fields never interact.

use super::attr::{merge_attr, Attr};
use super::caller::CallerFormatter;
use super::error::Result;
use super::formatter::Formatter;
use super::level::Level;
use super::logger::Logger;
use super::sink::Sink;
use super::styles::{default_styles, Styles};
use super::timestamp::{TimeFunction, TimestampFormat};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::sync::Arc;

/// Resolved logger configuration
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum level emitted. Default: [`Level::Info`]
    pub level: Level,
    /// Output destination. Default: stderr
    pub writer: Sink,
    /// Style table for the text formatter. Default: [`default_styles`];
    /// `None` falls back to [`Styles::base`]
    pub styles: Option<Arc<Styles>>,
    /// Default: empty
    pub prefix: String,
    pub report_timestamp: bool,
    pub report_caller: bool,
    pub caller_formatter: CallerFormatter,
    /// Extra stack frames to skip when resolving the caller. Default: 0
    pub caller_offset: usize,
    /// Attributes attached to every record, in order
    pub fields: Vec<Attr>,
    pub formatter: Formatter,
    pub time_function: TimeFunction,
    pub time_format: TimestampFormat,
    /// Register the built logger as the process-wide default
    pub is_default: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            level: Level::Info,
            writer: Sink::stderr(),
            styles: Some(default_styles()),
            prefix: String::new(),
            report_timestamp: false,
            report_caller: false,
            caller_formatter: CallerFormatter::Short,
            caller_offset: 0,
            fields: Vec::new(),
            formatter: Formatter::Text,
            time_function: TimeFunction::default(),
            time_format: TimestampFormat::Default,
            is_default: false,
        }
    }
}

impl Options {
    /// Check values the infallible constructor would otherwise paper over
    pub fn validate(&self) -> Result<()> {
        self.time_format.validate()
    }
}

/// Builder for [`Logger`]
///
/// # Example
/// ```
/// use rust_log_facade::prelude::*;
///
/// let buf = SharedBuffer::new();
/// let logger = Logger::builder()
///     .level(Level::Debug)
///     .output(buf.clone())
///     .prefix("api")
///     .formatter(Formatter::Logfmt)
///     .field("service", "billing")
///     .build();
///
/// logger.debug("ready");
/// assert!(buf.contents().contains("service=\"billing\""));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    options: Options,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.options.level = level;
        self
    }

    /// Write records to `writer`
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.options.writer = Sink::new(writer);
        self
    }

    /// Write records to an existing sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.options.writer = sink;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn styles(mut self, styles: impl Into<Arc<Styles>>) -> Self {
        self.options.styles = Some(styles.into());
        self
    }

    /// Use the engine's base style table instead of the default one
    #[must_use = "builder methods return a new value"]
    pub fn no_styles(mut self) -> Self {
        self.options.styles = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = prefix.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_timestamp(mut self, report: bool) -> Self {
        self.options.report_timestamp = report;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn report_caller(mut self, report: bool) -> Self {
        self.options.report_caller = report;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_formatter(mut self, formatter: CallerFormatter) -> Self {
        self.options.caller_formatter = formatter;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_offset(mut self, offset: usize) -> Self {
        self.options.caller_offset = offset;
        self
    }

    /// Merge `fields` into the static fields. A key that is already present
    /// keeps its position and takes the new value.
    #[must_use = "builder methods return a new value"]
    pub fn fields<I, A>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Attr>,
    {
        for attr in fields {
            merge_attr(&mut self.options.fields, attr.into());
        }
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn field(self, key: impl Into<String>, value: impl Into<super::attr::Value>) -> Self {
        self.fields([Attr::new(key, value)])
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Formatter) -> Self {
        self.options.formatter = formatter;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_function<F>(mut self, f: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.options.time_function = TimeFunction::new(f);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.options.time_format = format.into();
        self
    }

    /// Register the built logger as the process-wide default
    #[must_use = "builder methods return a new value"]
    pub fn as_default(mut self) -> Self {
        self.options.is_default = true;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn into_options(self) -> Options {
        self.options
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::new(self.options)
    }

    /// Build the Logger, rejecting invalid option values
    pub fn try_build(self) -> Result<Logger> {
        self.options.validate()?;
        Ok(Logger::new(self.options))
    }
}

impl From<Options> for LoggerBuilder {
    fn from(options: Options) -> Self {
        Self { options }
    }
}
