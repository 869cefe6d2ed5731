//! Record encodings
//!
//! - Text: human-readable, styled through a [`Styles`] table
//! - Json: one JSON object per line
//! - Logfmt: `key=value` pairs understood by log aggregation tools

use super::attr::{Attr, Value};
use super::caller::CallerFormatter;
use super::record::Record;
use super::styles::Styles;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

pub const TIMESTAMP_KEY: &str = "time";
pub const LEVEL_KEY: &str = "level";
pub const CALLER_KEY: &str = "caller";
pub const PREFIX_KEY: &str = "prefix";
pub const MESSAGE_KEY: &str = "msg";

/// Output format for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// Example: `2025/01/08 10:30:45 INFO <app/main.rs:12> api: Request processed status=200`
    #[default]
    Text,

    /// Example: `{"level":"info","msg":"Request processed","status":200}`
    Json,

    /// Example: `level=info msg="Request processed" status=200`
    Logfmt,
}

impl std::str::FromStr for Formatter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Formatter::Text),
            "json" => Ok(Formatter::Json),
            "logfmt" => Ok(Formatter::Logfmt),
            _ => Err(format!("Invalid formatter: '{}'", s)),
        }
    }
}

/// Settings a formatter reads while rendering one record
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    pub prefix: &'a str,
    pub report_timestamp: bool,
    pub time_format: &'a TimestampFormat,
    pub caller_formatter: CallerFormatter,
    pub styles: &'a Styles,
    pub colorize: bool,
}

impl Formatter {
    /// Render `record` as a single line without the trailing newline
    pub fn format(&self, record: &Record, opts: &FormatOptions<'_>) -> String {
        match self {
            Formatter::Text => format_text(record, opts),
            Formatter::Json => format_json(record, opts),
            Formatter::Logfmt => format_logfmt(record, opts),
        }
    }
}

/// Escape line breaks so one record can never span several lines
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn flatten(attrs: &[Attr]) -> Vec<(String, &Value)> {
    let mut out = Vec::with_capacity(attrs.len());
    for attr in attrs {
        attr.flatten_into("", &mut out);
    }
    out
}

fn format_text(record: &Record, opts: &FormatOptions<'_>) -> String {
    let styles = opts.styles;
    let mut parts = Vec::new();

    if opts.report_timestamp {
        let ts = opts.time_format.format(&record.time);
        parts.push(styles.timestamp.render(&ts, opts.colorize));
    }
    if let Some(level) = record.level {
        parts.push(styles.level(level).render(level.to_str(), opts.colorize));
    }
    if let Some(ref caller) = record.caller {
        let caller = format!("<{}>", opts.caller_formatter.format(caller));
        parts.push(styles.caller.render(&caller, opts.colorize));
    }
    if !opts.prefix.is_empty() {
        let prefix = format!("{}:", sanitize_message(opts.prefix));
        parts.push(styles.prefix.render(&prefix, opts.colorize));
    }
    if !record.message.is_empty() {
        let message = sanitize_message(&record.message);
        parts.push(styles.message.render(&message, opts.colorize));
    }
    for (key, value) in flatten(&record.attrs) {
        let key = sanitize_message(&key);
        let value = match value {
            Value::String(s) => escape_logfmt_value(s),
            other => escape_logfmt_value(&other.to_string()),
        };
        parts.push(format!(
            "{}{}{}",
            styles.key.render(&key, opts.colorize),
            styles.separator.render("=", opts.colorize),
            styles.value.render(&value, opts.colorize)
        ));
    }

    parts.join(" ")
}

fn format_json(record: &Record, opts: &FormatOptions<'_>) -> String {
    let mut json_obj = serde_json::Map::new();

    if opts.report_timestamp {
        json_obj.insert(
            TIMESTAMP_KEY.to_string(),
            format_timestamp_json(record, opts.time_format),
        );
    }
    if let Some(level) = record.level {
        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(level.as_lowercase().to_string()),
        );
    }
    if let Some(ref caller) = record.caller {
        json_obj.insert(
            CALLER_KEY.to_string(),
            serde_json::Value::String(opts.caller_formatter.format(caller)),
        );
    }
    if !opts.prefix.is_empty() {
        json_obj.insert(
            PREFIX_KEY.to_string(),
            serde_json::Value::String(opts.prefix.to_string()),
        );
    }
    json_obj.insert(
        MESSAGE_KEY.to_string(),
        serde_json::Value::String(record.message.clone()),
    );

    for attr in &record.attrs {
        insert_json(&mut json_obj, attr.key.clone(), attr.value.to_json_value());
    }

    serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default()
}

/// Insert, merging objects when a group key repeats
fn insert_json(
    map: &mut serde_json::Map<String, serde_json::Value>,
    key: String,
    value: serde_json::Value,
) {
    match (map.get_mut(&key), value) {
        (Some(serde_json::Value::Object(existing)), serde_json::Value::Object(incoming)) => {
            for (k, v) in incoming {
                insert_json(existing, k, v);
            }
        }
        (_, value) => {
            map.insert(key, value);
        }
    }
}

fn format_timestamp_json(record: &Record, time_format: &TimestampFormat) -> serde_json::Value {
    let formatted = time_format.format(&record.time);
    if time_format.is_numeric() {
        if let Ok(n) = formatted.parse::<i64>() {
            return serde_json::Value::Number(n.into());
        }
    }
    serde_json::Value::String(formatted)
}

fn format_logfmt(record: &Record, opts: &FormatOptions<'_>) -> String {
    let mut parts = Vec::new();

    if opts.report_timestamp {
        parts.push(format!(
            "{}={}",
            TIMESTAMP_KEY,
            escape_logfmt_value(&opts.time_format.format(&record.time))
        ));
    }
    if let Some(level) = record.level {
        parts.push(format!("{}={}", LEVEL_KEY, level.as_lowercase()));
    }
    if let Some(ref caller) = record.caller {
        parts.push(format!(
            "{}={}",
            CALLER_KEY,
            escape_logfmt_value(&opts.caller_formatter.format(caller))
        ));
    }
    if !opts.prefix.is_empty() {
        parts.push(format!("{}={}", PREFIX_KEY, escape_logfmt_value(opts.prefix)));
    }
    // Message is always quoted
    parts.push(format!(
        "{}={}",
        MESSAGE_KEY,
        quote_logfmt_value(&sanitize_message(&record.message))
    ));

    for (key, value) in flatten(&record.attrs) {
        let formatted_value = match value {
            Value::String(s) => quote_logfmt_value(&sanitize_message(s)),
            Value::Null => "null".to_string(),
            other => escape_logfmt_value(&other.to_string()),
        };
        parts.push(format!("{}={}", escape_logfmt_key(&key), formatted_value));
    }

    parts.join(" ")
}

/// Escape a logfmt key (remove spaces and special chars)
fn escape_logfmt_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect()
}

/// Escape line breaks, then quote if the value contains spaces
fn escape_logfmt_value(value: &str) -> String {
    let value = sanitize_message(value);
    if value.is_empty() || value.contains(' ') || value.contains('"') || value.contains('=') {
        quote_logfmt_value(&value)
    } else {
        value
    }
}

fn quote_logfmt_value(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
