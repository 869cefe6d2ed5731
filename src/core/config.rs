//! Logger configuration from JSON or the environment
//!
//! [`LoggerConfig`] is plain data; [`LoggerConfig::into_builder`] turns it
//! into a [`LoggerBuilder`] so code-level options can still be layered on top.

use super::caller::CallerFormatter;
use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::level::Level;
use super::options::LoggerBuilder;
use super::sink::Sink;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_LEVEL: &str = "LOG_LEVEL";
pub const ENV_FORMAT: &str = "LOG_FORMAT";
pub const ENV_PREFIX: &str = "LOG_PREFIX";
pub const ENV_REPORT_CALLER: &str = "LOG_REPORT_CALLER";
pub const ENV_REPORT_TIMESTAMP: &str = "LOG_REPORT_TIMESTAMP";
pub const ENV_TIME_FORMAT: &str = "LOG_TIME_FORMAT";
pub const ENV_OUTPUT: &str = "LOG_OUTPUT";

/// Serializable logger settings
///
/// # Example
/// ```
/// use rust_log_facade::{Level, LoggerConfig};
///
/// let config = LoggerConfig::from_json(r#"{"level": "debug", "prefix": "api"}"#).unwrap();
/// assert_eq!(config.level, Level::Debug);
/// let logger = config.into_builder().unwrap().build();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Level,
    pub formatter: Formatter,
    pub prefix: String,
    pub report_caller: bool,
    pub report_timestamp: bool,
    pub caller_formatter: CallerFormatter,
    /// strftime layout; `None` keeps the default layout
    pub time_format: Option<String>,
    /// `stderr`, `stdout` or a file path appended to. Default: stderr
    pub output: Option<String>,
}

impl LoggerConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation("read config", path.display().to_string(), e)
        })?;
        Self::from_json(&text)
    }

    /// Defaults overridden by the `LOG_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `LOG_*` keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(ENV_LEVEL) {
            config.level = level
                .parse()
                .map_err(|e: String| LoggerError::config(ENV_LEVEL, e))?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            config.formatter = format
                .parse()
                .map_err(|e: String| LoggerError::config(ENV_FORMAT, e))?;
        }
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.prefix = prefix;
        }
        if let Some(flag) = lookup(ENV_REPORT_CALLER) {
            config.report_caller = parse_flag(ENV_REPORT_CALLER, &flag)?;
        }
        if let Some(flag) = lookup(ENV_REPORT_TIMESTAMP) {
            config.report_timestamp = parse_flag(ENV_REPORT_TIMESTAMP, &flag)?;
        }
        config.time_format = lookup(ENV_TIME_FORMAT).or(config.time_format);
        config.output = lookup(ENV_OUTPUT).or(config.output);
        Ok(config)
    }

    /// Builder preloaded with these settings. Opens the output file, if any,
    /// and rejects an invalid time layout.
    pub fn into_builder(self) -> Result<LoggerBuilder> {
        let sink = match self.output.as_deref() {
            None | Some("stderr") => Sink::stderr(),
            Some("stdout") => Sink::stdout(),
            Some(path) => Sink::file(path)?,
        };

        let mut builder = LoggerBuilder::new()
            .level(self.level)
            .formatter(self.formatter)
            .prefix(self.prefix)
            .report_caller(self.report_caller)
            .report_timestamp(self.report_timestamp)
            .caller_formatter(self.caller_formatter)
            .sink(sink);
        if let Some(layout) = self.time_format {
            let format = TimestampFormat::from(layout);
            format.validate()?;
            builder = builder.time_format(format);
        }
        Ok(builder)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(LoggerError::config(
            key,
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_json_defaults() {
        let config = LoggerConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.formatter, Formatter::Text);
    }

    #[test]
    fn test_json_fields() {
        let config = LoggerConfig::from_json(
            r#"{"level":"warn","formatter":"logfmt","report_caller":true,"caller_formatter":"long"}"#,
        )
        .unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.formatter, Formatter::Logfmt);
        assert!(config.report_caller);
        assert_eq!(config.caller_formatter, CallerFormatter::Long);
    }

    #[test]
    fn test_json_rejects_unknown_level() {
        assert!(LoggerConfig::from_json(r#"{"level":"loud"}"#).is_err());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = LoggerConfig::from_lookup(lookup(&[
            (ENV_LEVEL, "WARNING"),
            (ENV_FORMAT, "json"),
            (ENV_PREFIX, "worker"),
            (ENV_REPORT_TIMESTAMP, "yes"),
            (ENV_TIME_FORMAT, "%H:%M:%S"),
        ]))
        .unwrap();
        assert_eq!(config.level, Level::Warn);
        assert_eq!(config.formatter, Formatter::Json);
        assert_eq!(config.prefix, "worker");
        assert!(config.report_timestamp);
        assert!(!config.report_caller);
        assert_eq!(config.time_format.as_deref(), Some("%H:%M:%S"));
    }

    #[test]
    fn test_lookup_errors_name_the_variable() {
        let err = LoggerConfig::from_lookup(lookup(&[(ENV_REPORT_CALLER, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_REPORT_CALLER));

        let err = LoggerConfig::from_lookup(lookup(&[(ENV_FORMAT, "xml")])).unwrap_err();
        assert!(err.to_string().contains(ENV_FORMAT));
    }

    #[test]
    fn test_into_builder_rejects_bad_layout() {
        let config = LoggerConfig {
            time_format: Some("%Q".to_string()),
            ..Default::default()
        };
        assert!(config.into_builder().is_err());
    }

    #[test]
    fn test_into_builder_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LoggerConfig {
            prefix: "file".to_string(),
            output: Some(path.display().to_string()),
            ..Default::default()
        };

        let logger = config.into_builder().unwrap().build();
        logger.info("persisted");
        logger.flush().unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "INFO file: persisted\n");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logger.json");
        std::fs::write(&path, r#"{"prefix":"disk"}"#).unwrap();
        assert_eq!(LoggerConfig::from_json_file(&path).unwrap().prefix, "disk");
        assert!(LoggerConfig::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
