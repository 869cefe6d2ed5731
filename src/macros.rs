//! Logging macros for ergonomic log message formatting.
//!
//! Every macro accepts either a format string, which logs on the
//! process-wide default logger, or a logger expression followed by a format
//! string.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::prelude::*;
//! use rust_log_facade::info;
//!
//! let buf = SharedBuffer::new();
//! let logger = Logger::builder().output(buf.clone()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! assert_eq!(buf.lines(), vec!["INFO Server started", "INFO Server listening on port 8080"]);
//! ```

/// Log a message at an explicit level.
///
/// `log!(level; ...)` targets the process-wide default logger.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use rust_log_facade::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// log!(Level::Debug; "below the default threshold");
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr; $($arg:tt)+) => {
        $crate::logf($level, format_args!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.logf($level, format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).level(Level::Debug).build();
/// use rust_log_facade::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($arg:tt)*) => {
        $crate::debugf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(format_args!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::builder().output(SharedBuffer::new()).build();
/// use rust_log_facade::info;
/// info!(logger, "Application started");
/// info!(logger, "Loaded {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::infof(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($arg:tt)*) => {
        $crate::warnf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::errorf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(format_args!($($arg)+))
    };
}

/// Log a fatal-level message and exit the process with status 1.
///
/// # Examples
///
/// ```no_run
/// # use rust_log_facade::prelude::*;
/// # let logger = Logger::builder().build();
/// use rust_log_facade::fatal;
/// fatal!(logger, "Critical failure: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($arg:tt)*) => {
        $crate::fatalf(format_args!($fmt $($arg)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(format_args!($($arg)+))
    };
}
