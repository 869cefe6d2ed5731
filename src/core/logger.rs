//! Main logger implementation

use super::{
    attr::Attr,
    context::Context,
    handler::{Handler, LogHandler},
    level::Level,
    metrics::LoggerMetrics,
    options::{LoggerBuilder, Options},
    record::Record,
    error::Result,
};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

const NO_ATTRS: [Attr; 0] = [];

/// Exit status of the process after a fatal record
pub const FATAL_EXIT_CODE: i32 = 1;

/// A configured logger instance.
///
/// Cloning is cheap and yields a handle to the same instance; use
/// [`Logger::ptr_eq`] to compare identity.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<LogHandler>,
}

impl Logger {
    /// Build a logger from resolved options.
    ///
    /// When `options.is_default` is set the logger also replaces the
    /// process-wide default.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let is_default = options.is_default;
        let logger = Self {
            handler: Arc::new(LogHandler::new(options)),
        };
        if is_default {
            crate::global::set_default(logger.clone());
        }
        logger
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_log_facade::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .prefix("worker")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn from_handler(handler: LogHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// The engine handler; reconfigure it through [`Configurable`].
    ///
    /// [`Configurable`]: super::handler::Configurable
    pub fn handler(&self) -> &Arc<LogHandler> {
        &self.handler
    }

    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.handler.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.handler.flush()
    }

    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// A logger that adds `attrs` to every record
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        Self::from_handler(self.handler.derive_with_attrs(attrs.into_iter().collect()))
    }

    /// A logger that nests attributes added afterwards under `name`
    #[must_use]
    pub fn with_group(&self, name: &str) -> Logger {
        Self::from_handler(self.handler.derive_with_group(name))
    }

    /// A logger identical to this one but with another prefix
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Logger {
        Self::from_handler(self.handler.derive_with_prefix(prefix))
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(&Context::background(), level, message, attrs);
    }

    #[track_caller]
    pub fn log_attrs(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.enabled(ctx, level) {
            self.handler.metrics().record_filtered();
            return;
        }
        let record = Record::new(Some(level), message).with_attrs(attrs);
        self.dispatch(ctx, record, Location::caller());
    }

    /// Emit a record without a level; never filtered
    #[track_caller]
    pub fn print(&self, message: impl Into<String>) {
        let record = Record::new(None, message);
        self.dispatch(&Context::background(), record, Location::caller());
    }

    /// Emit a prepared record, attaching the caller when reporting is on
    pub(crate) fn dispatch(&self, ctx: &Context, mut record: Record, location: &'static Location<'static>) {
        if record.caller.is_none() {
            record.caller = self.handler.resolve_caller(location);
        }
        if let Err(e) = self.handler.handle(ctx, record) {
            let failed = self.handler.metrics().failed_count();
            // Report the first failure and every thousandth after it
            if failed == 1 || failed % 1000 == 0 {
                eprintln!(
                    "[LOGGER ERROR] Failed to write record ({} failures so far, {:.1}% of writes): {}",
                    failed,
                    self.handler.metrics().failure_rate(),
                    e
                );
            }
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message, NO_ATTRS);
    }

    /// Log at fatal level, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.log(Level::Fatal, message, NO_ATTRS);
        let _ = self.flush();
        std::process::exit(FATAL_EXIT_CODE);
    }

    #[inline]
    #[track_caller]
    pub fn debug_ctx(&self, ctx: &Context, message: impl Into<String>) {
        self.log_attrs(ctx, Level::Debug, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn info_ctx(&self, ctx: &Context, message: impl Into<String>) {
        self.log_attrs(ctx, Level::Info, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn warn_ctx(&self, ctx: &Context, message: impl Into<String>) {
        self.log_attrs(ctx, Level::Warn, message, NO_ATTRS);
    }

    #[inline]
    #[track_caller]
    pub fn error_ctx(&self, ctx: &Context, message: impl Into<String>) {
        self.log_attrs(ctx, Level::Error, message, NO_ATTRS);
    }

    /// Formatted variant of [`Logger::log`]
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        // Skip formatting when the record would be dropped anyway
        if self.enabled(&Context::background(), level) {
            self.log(level, args.to_string(), NO_ATTRS);
        } else {
            self.handler.metrics().record_filtered();
        }
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(args.to_string())
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.print(args.to_string());
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("handler", &Arc::as_ptr(&self.handler))
            .finish()
    }
}

/// Object-safe structured-logging surface implemented by [`Logger`].
///
/// Code that only needs to emit records can accept
/// `&dyn StructuredLogger` and be handed any implementation.
pub trait StructuredLogger: Send + Sync {
    fn log_attrs(&self, ctx: &Context, level: Level, message: &str, attrs: Vec<Attr>);

    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    fn handler(&self) -> Arc<dyn Handler>;

    fn with(&self, attrs: Vec<Attr>) -> Logger;

    fn with_group(&self, name: &str) -> Logger;

    #[track_caller]
    fn log(&self, level: Level, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(&Context::background(), level, message, attrs);
    }

    #[track_caller]
    fn debug(&self, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(&Context::background(), Level::Debug, message, attrs);
    }

    #[track_caller]
    fn info(&self, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(&Context::background(), Level::Info, message, attrs);
    }

    #[track_caller]
    fn warn(&self, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(&Context::background(), Level::Warn, message, attrs);
    }

    #[track_caller]
    fn error(&self, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(&Context::background(), Level::Error, message, attrs);
    }

    #[track_caller]
    fn debug_ctx(&self, ctx: &Context, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(ctx, Level::Debug, message, attrs);
    }

    #[track_caller]
    fn info_ctx(&self, ctx: &Context, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(ctx, Level::Info, message, attrs);
    }

    #[track_caller]
    fn warn_ctx(&self, ctx: &Context, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(ctx, Level::Warn, message, attrs);
    }

    #[track_caller]
    fn error_ctx(&self, ctx: &Context, message: &str, attrs: Vec<Attr>) {
        self.log_attrs(ctx, Level::Error, message, attrs);
    }
}

impl StructuredLogger for Logger {
    #[track_caller]
    fn log_attrs(&self, ctx: &Context, level: Level, message: &str, attrs: Vec<Attr>) {
        Logger::log_attrs(self, ctx, level, message, attrs);
    }

    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        Logger::enabled(self, ctx, level)
    }

    fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler) as Arc<dyn Handler>
    }

    fn with(&self, attrs: Vec<Attr>) -> Logger {
        Logger::with(self, attrs)
    }

    fn with_group(&self, name: &str) -> Logger {
        Logger::with_group(self, name)
    }
}
