//! # Rust Log Facade
//!
//! A structured logging facade: one constructor configured through option
//! units, a lazily created process-wide default logger, request-scoped
//! logger propagation and an adapter for line-oriented legacy logging.
//!
//! ## Features
//!
//! - **Structured records**: typed key-value attributes and nested groups
//! - **Three encodings**: styled text, JSON and logfmt
//! - **Default logger**: package-level functions and setters, created on first use
//! - **Context propagation**: carry a logger through call chains
//! - **Legacy bridge**: `println`, `std::io::Write` and the `log` crate
//!
//! ## Example
//!
//! ```
//! use rust_log_facade::prelude::*;
//!
//! let buf = SharedBuffer::new();
//! let logger = Logger::builder()
//!     .output(buf.clone())
//!     .prefix("api")
//!     .build();
//!
//! logger.with([Attr::int("status", 200)]).info("request served");
//! assert_eq!(buf.contents(), "INFO api: request served status=200\n");
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod stdlog;

pub mod prelude {
    pub use crate::core::{
        from_context, with_context, Attr, CallerFormatter, Configurable, Context, Formatter,
        Handler, Level, Logger, LoggerBuilder, LoggerConfig, LoggerError, Options, Result,
        SharedBuffer, Sink, StructuredLogger, Style, Styles, TimestampFormat, Value,
    };
    pub use crate::global::{default_styles, set_default};
    pub use crate::stdlog::{standard_log, StandardLog, StandardLogOptions};
}

pub use crate::core::{
    default_styles, from_context, with_context, Attr, Caller, CallerFormatter, Color,
    Configurable, Context, Formatter, Handler, Level, LogHandler, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, Options, Record, Result, SharedBuffer, Sink,
    StructuredLogger, Style, Styles, TimeFunction, TimestampFormat, Value, DEFAULT_TIME_LAYOUT,
    FATAL_EXIT_CODE,
};
pub use global::{
    debug, debugf, default, error, errorf, fatal, fatalf, info, infof, log, logf, print, printf,
    set_caller_formatter, set_caller_offset, set_default, set_formatter, set_level, set_output,
    set_prefix, set_report_caller, set_report_timestamp, set_sink, set_styles, set_time_format,
    set_time_function, warn, warnf, with_prefix,
};
pub use stdlog::{standard_log, StandardLog, StandardLogOptions};
