//! Core logger types and traits

pub mod attr;
pub mod caller;
pub mod config;
pub mod context;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod record;
pub mod sink;
pub mod styles;
pub mod timestamp;

pub use attr::{Attr, Value};
pub use caller::{Caller, CallerFormatter};
pub use config::LoggerConfig;
pub use context::{from_context, with_context, Context};
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use handler::{Configurable, Handler, LogHandler};
pub use level::Level;
pub use logger::{Logger, StructuredLogger, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use options::{LoggerBuilder, Options};
pub use record::Record;
pub use sink::{SharedBuffer, Sink};
pub use styles::{default_styles, Color, Style, Styles};
pub use timestamp::{TimeFunction, TimestampFormat, DEFAULT_TIME_LAYOUT};
