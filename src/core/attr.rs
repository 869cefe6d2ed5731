//! Attribute model for structured records
//!
//! An [`Attr`] is a key paired with a [`Value`]. Groups nest attributes under a
//! common key; text and logfmt output flatten them with `.`, JSON output nests
//! them as objects.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Value carried by an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<Utc>),
    Group(Vec<Attr>),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Group(attrs) => {
                let parts: Vec<String> = attrs.iter().map(|a| a.to_string()).collect();
                write!(f, "{{{}}}", parts.join(" "))
            }
            Value::Null => write!(f, "null"),
        }
    }
}

impl Value {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Duration(d) => serde_json::Value::String(format!("{:?}", d)),
            Value::Time(t) => serde_json::Value::String(t.to_rfc3339()),
            Value::Group(attrs) => {
                let mut map = serde_json::Map::new();
                for attr in attrs {
                    map.insert(attr.key.clone(), attr.value.to_json_value());
                }
                serde_json::Value::Object(map)
            }
            Value::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A key-value pair attached to a record
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// Nest `attrs` under `key`
    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self::new(key, Value::Group(attrs.into_iter().collect()))
    }

    /// Flatten this attribute into `(dotted.key, leaf value)` pairs.
    pub fn flatten_into<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
        let key = if prefix.is_empty() {
            self.key.clone()
        } else {
            format!("{}.{}", prefix, self.key)
        };
        match &self.value {
            Value::Group(attrs) => {
                for attr in attrs {
                    attr.flatten_into(&key, out);
                }
            }
            value => out.push((key, value)),
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Attr {
    fn from((key, value): (K, V)) -> Self {
        Attr::new(key, value)
    }
}

/// Replace the value of an existing key or append a new attribute.
pub(crate) fn merge_attr(attrs: &mut Vec<Attr>, attr: Attr) {
    match attrs.iter_mut().find(|a| a.key == attr.key) {
        Some(existing) => existing.value = attr.value,
        None => attrs.push(attr),
    }
}
