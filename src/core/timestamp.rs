//! Timestamp formatting utilities
//!
//! Provides the time format used when a logger reports timestamps, and the
//! time function hook that lets callers replace the wall clock.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::sync::Arc;

/// strftime layout used by [`TimestampFormat::Default`]
pub const DEFAULT_TIME_LAYOUT: &str = "%Y/%m/%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_log_facade::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025/01/08 10:30:45`
    #[default]
    Default,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use rust_log_facade::TimestampFormat;
    ///
    /// let format = TimestampFormat::from("%Y-%m-%d");
    /// assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// An invalid custom layout renders with [`DEFAULT_TIME_LAYOUT`].
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Default => datetime.format(DEFAULT_TIME_LAYOUT).to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(layout) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(layout)) {
                    Ok(()) => out,
                    Err(fmt::Error) => datetime.format(DEFAULT_TIME_LAYOUT).to_string(),
                }
            }
        }
    }

    /// Check that a custom layout only contains valid strftime specifiers
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(layout) = self {
            if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "time_format",
                    format!("invalid strftime layout '{}'", layout),
                ));
            }
        }
        Ok(())
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}

impl From<&str> for TimestampFormat {
    fn from(layout: &str) -> Self {
        TimestampFormat::Custom(layout.to_string())
    }
}

impl From<String> for TimestampFormat {
    fn from(layout: String) -> Self {
        TimestampFormat::Custom(layout)
    }
}

/// Maps the wall-clock time of a record to the time that gets reported.
///
/// The default is the identity; tests install a fixed clock.
#[derive(Clone)]
pub struct TimeFunction(Arc<dyn Fn(DateTime<Utc>) -> DateTime<Utc> + Send + Sync>);

impl TimeFunction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Always report `time`
    pub fn fixed(time: DateTime<Utc>) -> Self {
        Self::new(move |_| time)
    }

    pub fn apply(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        (self.0)(now)
    }
}

impl Default for TimeFunction {
    fn default() -> Self {
        Self::new(|now| now)
    }
}

impl fmt::Debug for TimeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeFunction")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_default_layout() {
        let result = TimestampFormat::Default.format(&fixed_datetime());
        assert_eq!(result, "2025/01/08 10:30:45");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats() {
        let secs: i64 = TimestampFormat::Unix
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix timestamp");
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .expect("valid unix millis timestamp");
        assert_eq!(millis / 1000, secs);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::from("%Y-%m-%d");
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08");
    }

    #[test]
    fn test_invalid_custom_layout_falls_back() {
        let format = TimestampFormat::from("%Y-%Q");
        assert!(format.validate().is_err());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30:45");
    }

    #[test]
    fn test_validate_accepts_builtin_and_valid_layouts() {
        assert!(TimestampFormat::Rfc3339.validate().is_ok());
        assert!(TimestampFormat::from("%H:%M").validate().is_ok());
    }

    #[test]
    fn test_is_numeric() {
        assert!(!TimestampFormat::Default.is_numeric());
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(TimestampFormat::UnixMillis.is_numeric());
    }

    #[test]
    fn test_deserialization() {
        let format: TimestampFormat =
            serde_json::from_str("\"Iso8601\"").expect("deserialize Iso8601");
        assert_eq!(format, TimestampFormat::Iso8601);

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }

    #[test]
    fn test_time_function() {
        let shifted = TimeFunction::new(|t| t + chrono::Duration::hours(1));
        assert_eq!(
            shifted.apply(fixed_datetime()),
            fixed_datetime() + chrono::Duration::hours(1)
        );
        assert_eq!(TimeFunction::default().apply(fixed_datetime()), fixed_datetime());
        assert_eq!(
            TimeFunction::fixed(fixed_datetime()).apply(Utc::now()),
            fixed_datetime()
        );
    }
}
