//! Log record structure

use super::attr::Attr;
use super::caller::Caller;
use super::level::Level;
use chrono::{DateTime, Utc};

/// A single log event as handed to a [`Handler`](super::handler::Handler).
///
/// `level` is `None` for records emitted through `print`, which bypass level
/// filtering and render without a level label.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Option<Level>,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub caller: Option<Caller>,
}

impl Record {
    pub fn new(level: Option<Level>, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            caller: None,
        }
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}
