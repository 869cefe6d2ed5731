//! Record handlers
//!
//! [`Handler`] is the structured-logging handler abstraction a [`Logger`]
//! hands records to. [`Configurable`] is the mutation surface the
//! package-level setters need; [`LogHandler`] is the one engine type that
//! implements both.
//!
//! [`Logger`]: super::logger::Logger

use super::attr::Attr;
use super::caller::{Caller, CallerFormatter};
use super::context::Context;
use super::error::Result;
use super::formatter::{FormatOptions, Formatter};
use super::level::Level;
use super::metrics::LoggerMetrics;
use super::options::Options;
use super::record::Record;
use super::sink::Sink;
use super::styles::Styles;
use super::timestamp::{TimeFunction, TimestampFormat};
use parking_lot::RwLock;
use std::panic::Location;
use std::sync::Arc;

pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be emitted
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Emit a record that already passed [`Handler::enabled`]
    fn handle(&self, ctx: &Context, record: Record) -> Result<()>;

    /// A handler that adds `attrs` to every record
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that nests subsequent attributes under `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

/// Live reconfiguration of a handler.
///
/// Each setter replaces a single field; a record being formatted
/// concurrently sees either the old or the new value.
pub trait Configurable {
    fn set_output(&self, sink: Sink);
    fn set_level(&self, level: Level);
    fn set_prefix(&self, prefix: String);
    fn set_formatter(&self, formatter: Formatter);
    fn set_styles(&self, styles: Arc<Styles>);
    fn set_report_caller(&self, report: bool);
    fn set_report_timestamp(&self, report: bool);
    fn set_time_format(&self, format: TimestampFormat);
    fn set_time_function(&self, f: TimeFunction);
    fn set_caller_formatter(&self, formatter: CallerFormatter);
    fn set_caller_offset(&self, offset: usize);

    fn level(&self) -> Level;
    fn prefix(&self) -> String;
    fn formatter(&self) -> Formatter;
    fn output(&self) -> Sink;
    fn styles(&self) -> Arc<Styles>;
    fn report_caller(&self) -> bool;
    fn report_timestamp(&self) -> bool;
    fn caller_offset(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Settings {
    level: Level,
    sink: Sink,
    styles: Arc<Styles>,
    prefix: String,
    report_timestamp: bool,
    report_caller: bool,
    caller_formatter: CallerFormatter,
    caller_offset: usize,
    formatter: Formatter,
    time_function: TimeFunction,
    time_format: TimestampFormat,
}

/// The leveled text/JSON/logfmt engine behind every [`Logger`].
///
/// Derived handlers (`with_attrs`, `with_group`, `with_prefix`) start from a
/// snapshot of the parent's settings and share its sink and metrics.
///
/// [`Logger`]: super::logger::Logger
#[derive(Debug)]
pub struct LogHandler {
    settings: RwLock<Settings>,
    fields: Vec<Attr>,
    groups: Vec<String>,
    metrics: Arc<LoggerMetrics>,
}

impl LogHandler {
    pub fn new(options: Options) -> Self {
        let styles = options
            .styles
            .unwrap_or_else(|| Arc::new(Styles::base()));

        Self {
            settings: RwLock::new(Settings {
                level: options.level,
                sink: options.writer,
                styles,
                prefix: options.prefix,
                report_timestamp: options.report_timestamp,
                report_caller: options.report_caller,
                caller_formatter: options.caller_formatter,
                caller_offset: options.caller_offset,
                formatter: options.formatter,
                time_function: options.time_function,
                time_format: options.time_format,
            }),
            fields: options.fields,
            groups: Vec::new(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    fn derive(&self, settings: Settings, fields: Vec<Attr>, groups: Vec<String>) -> Self {
        Self {
            settings: RwLock::new(settings),
            fields,
            groups,
            metrics: Arc::clone(&self.metrics),
        }
    }

    /// Copy of this handler with extra attributes, nested under the open groups
    pub fn derive_with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(nest(&self.groups, attrs));
        self.derive(self.settings.read().clone(), fields, self.groups.clone())
    }

    pub fn derive_with_group(&self, name: &str) -> Self {
        let mut groups = self.groups.clone();
        groups.push(name.to_string());
        self.derive(self.settings.read().clone(), self.fields.clone(), groups)
    }

    pub fn derive_with_prefix(&self, prefix: &str) -> Self {
        let mut settings = self.settings.read().clone();
        settings.prefix = prefix.to_string();
        self.derive(settings, self.fields.clone(), self.groups.clone())
    }

    /// The caller to report for a log call at `location`, if enabled
    pub fn resolve_caller(&self, location: &'static Location<'static>) -> Option<Caller> {
        let (report, offset) = {
            let settings = self.settings.read();
            (settings.report_caller, settings.caller_offset)
        };
        report.then(|| Caller::resolve(location, offset))
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let sink = self.settings.read().sink.clone();
        sink.flush()
    }

    fn render(&self, mut record: Record) -> (String, Sink) {
        let settings = self.settings.read();
        record.time = settings.time_function.apply(record.time);
        if !settings.report_caller {
            record.caller = None;
        }
        if !self.fields.is_empty() || !self.groups.is_empty() {
            let own = std::mem::take(&mut record.attrs);
            let mut attrs = self.fields.clone();
            attrs.extend(nest(&self.groups, own));
            record.attrs = attrs;
        }

        let opts = FormatOptions {
            prefix: &settings.prefix,
            report_timestamp: settings.report_timestamp,
            time_format: &settings.time_format,
            caller_formatter: settings.caller_formatter,
            styles: &settings.styles,
            colorize: settings.sink.is_terminal() && settings.formatter == Formatter::Text,
        };
        let mut line = settings.formatter.format(&record, &opts);
        line.push('\n');
        (line, settings.sink.clone())
    }
}

/// Wrap `attrs` in one group per open group name, outermost first
fn nest(groups: &[String], attrs: Vec<Attr>) -> Vec<Attr> {
    if attrs.is_empty() {
        return attrs;
    }
    groups
        .iter()
        .rev()
        .fold(attrs, |inner, group| vec![Attr::group(group.clone(), inner)])
}

impl Handler for LogHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.settings.read().level
    }

    fn handle(&self, _ctx: &Context, record: Record) -> Result<()> {
        let (line, sink) = self.render(record);
        match sink.write_line(&line) {
            Ok(()) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e)
            }
        }
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(self.derive_with_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_with_group(name))
    }
}

impl Configurable for LogHandler {
    fn set_output(&self, sink: Sink) {
        self.settings.write().sink = sink;
    }

    fn set_level(&self, level: Level) {
        self.settings.write().level = level;
    }

    fn set_prefix(&self, prefix: String) {
        self.settings.write().prefix = prefix;
    }

    fn set_formatter(&self, formatter: Formatter) {
        self.settings.write().formatter = formatter;
    }

    fn set_styles(&self, styles: Arc<Styles>) {
        self.settings.write().styles = styles;
    }

    fn set_report_caller(&self, report: bool) {
        self.settings.write().report_caller = report;
    }

    fn set_report_timestamp(&self, report: bool) {
        self.settings.write().report_timestamp = report;
    }

    fn set_time_format(&self, format: TimestampFormat) {
        self.settings.write().time_format = format;
    }

    fn set_time_function(&self, f: TimeFunction) {
        self.settings.write().time_function = f;
    }

    fn set_caller_formatter(&self, formatter: CallerFormatter) {
        self.settings.write().caller_formatter = formatter;
    }

    fn set_caller_offset(&self, offset: usize) {
        self.settings.write().caller_offset = offset;
    }

    fn level(&self) -> Level {
        self.settings.read().level
    }

    fn prefix(&self) -> String {
        self.settings.read().prefix.clone()
    }

    fn formatter(&self) -> Formatter {
        self.settings.read().formatter
    }

    fn output(&self) -> Sink {
        self.settings.read().sink.clone()
    }

    fn styles(&self) -> Arc<Styles> {
        Arc::clone(&self.settings.read().styles)
    }

    fn report_caller(&self) -> bool {
        self.settings.read().report_caller
    }

    fn report_timestamp(&self) -> bool {
        self.settings.read().report_timestamp
    }

    fn caller_offset(&self) -> usize {
        self.settings.read().caller_offset
    }
}
