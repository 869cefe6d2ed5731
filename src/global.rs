//! Process-wide default logger
//!
//! [`default`] lazily builds one shared [`Logger`] on first use. The setters
//! in this module reconfigure either an explicit logger or, given `None`, the
//! default one, and the free log functions always target the default.

use crate::core::{
    attr::Attr,
    caller::CallerFormatter,
    formatter::Formatter,
    handler::Configurable,
    level::Level,
    logger::Logger,
    options::Options,
    sink::Sink,
    styles::Styles,
    timestamp::{TimeFunction, TimestampFormat},
};
use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::fmt;
use std::io::Write;
use std::sync::Arc;

pub use crate::core::styles::default_styles;

static DEFAULT_LOGGER: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

/// The process-wide default logger, created with [`Options::default`] on
/// first access. Concurrent first calls all observe the same instance.
pub fn default() -> Logger {
    if let Some(logger) = DEFAULT_LOGGER.read().as_ref() {
        return logger.clone();
    }

    let guard = DEFAULT_LOGGER.upgradable_read();
    if let Some(logger) = guard.as_ref() {
        return logger.clone();
    }
    let mut slot = RwLockUpgradableReadGuard::upgrade(guard);
    // Options::default() never sets is_default, so this cannot re-enter
    let logger = Logger::new(Options::default());
    *slot = Some(logger.clone());
    logger
}

/// Replace the process-wide default logger
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER.write() = Some(logger);
}

fn target(logger: Option<&Logger>) -> Logger {
    logger.cloned().unwrap_or_else(default)
}

/// A logger derived from `logger` that renders `prefix` instead
pub fn with_prefix(logger: &Logger, prefix: &str) -> Logger {
    logger.with_prefix(prefix)
}

pub fn set_output<W: Write + Send + 'static>(writer: W, logger: Option<&Logger>) {
    set_sink(Sink::new(writer), logger);
}

pub fn set_sink(sink: Sink, logger: Option<&Logger>) {
    target(logger).handler().set_output(sink);
}

pub fn set_level(level: Level, logger: Option<&Logger>) {
    target(logger).handler().set_level(level);
}

pub fn set_prefix(prefix: impl Into<String>, logger: Option<&Logger>) {
    target(logger).handler().set_prefix(prefix.into());
}

pub fn set_formatter(formatter: Formatter, logger: Option<&Logger>) {
    target(logger).handler().set_formatter(formatter);
}

pub fn set_styles(styles: impl Into<Arc<Styles>>, logger: Option<&Logger>) {
    target(logger).handler().set_styles(styles.into());
}

pub fn set_report_caller(report: bool, logger: Option<&Logger>) {
    target(logger).handler().set_report_caller(report);
}

pub fn set_report_timestamp(report: bool, logger: Option<&Logger>) {
    target(logger).handler().set_report_timestamp(report);
}

pub fn set_time_format(format: impl Into<TimestampFormat>, logger: Option<&Logger>) {
    target(logger).handler().set_time_format(format.into());
}

pub fn set_time_function<F>(f: F, logger: Option<&Logger>)
where
    F: Fn(DateTime<Utc>) -> DateTime<Utc> + Send + Sync + 'static,
{
    target(logger).handler().set_time_function(TimeFunction::new(f));
}

pub fn set_caller_formatter(formatter: CallerFormatter, logger: Option<&Logger>) {
    target(logger).handler().set_caller_formatter(formatter);
}

pub fn set_caller_offset(offset: usize, logger: Option<&Logger>) {
    target(logger).handler().set_caller_offset(offset);
}

#[track_caller]
pub fn debug(message: impl Into<String>) {
    default().debug(message);
}

#[track_caller]
pub fn info(message: impl Into<String>) {
    default().info(message);
}

#[track_caller]
pub fn warn(message: impl Into<String>) {
    default().warn(message);
}

#[track_caller]
pub fn error(message: impl Into<String>) {
    default().error(message);
}

/// Log on the default logger, then exit with status 1
#[track_caller]
pub fn fatal(message: impl Into<String>) -> ! {
    default().fatal(message)
}

/// Log without a level on the default logger
#[track_caller]
pub fn print(message: impl Into<String>) {
    default().print(message);
}

#[track_caller]
pub fn log(level: Level, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default().log(level, message, attrs);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    default().debugf(args);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    default().infof(args);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    default().warnf(args);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    default().errorf(args);
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) -> ! {
    default().fatalf(args)
}

#[track_caller]
pub fn printf(args: fmt::Arguments<'_>) {
    default().printf(args);
}

#[track_caller]
pub fn logf(level: Level, args: fmt::Arguments<'_>) {
    default().logf(level, args);
}
