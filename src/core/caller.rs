//! Caller resolution
//!
//! Log calls are `#[track_caller]`, so the call site is known without walking
//! the stack. A non-zero caller offset needs frames above the call site; those
//! come from a captured backtrace anchored at the tracked location. When the
//! backtrace carries no file information (stripped binaries) the tracked call
//! site is used as is.

use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// How a caller location is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerFormatter {
    /// Last two path components and the line: `core/logger.rs:42`
    #[default]
    Short,
    /// Full path and the line
    Long,
}

impl CallerFormatter {
    pub fn format(&self, caller: &Caller) -> String {
        match self {
            CallerFormatter::Short => format!("{}:{}", trim_path(&caller.file, 2), caller.line),
            CallerFormatter::Long => caller.to_string(),
        }
    }
}

fn trim_path(file: &str, keep: usize) -> &str {
    let mut idx = file.len();
    for _ in 0..keep {
        match file[..idx].rfind(['/', '\\']) {
            Some(pos) => idx = pos,
            None => return file,
        }
    }
    &file[idx + 1..]
}

/// Source location of a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }

    /// Resolve the caller `offset` frames above `location`.
    pub fn resolve(location: &'static Location<'static>, offset: usize) -> Self {
        if offset == 0 {
            return Self::from_location(location);
        }
        let frames = capture_frames();
        let anchor = frames.iter().position(|(file, line)| {
            *line == location.line() && Path::new(file).ends_with(location.file())
        });
        anchor
            .and_then(|idx| frames.into_iter().nth(idx + offset))
            .map(|(file, line)| Self::new(file, line))
            .unwrap_or_else(|| Self::from_location(location))
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// File/line pairs of the current stack, innermost first.
fn capture_frames() -> Vec<(String, u32)> {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix("at "))
        .filter_map(parse_frame_location)
        .collect()
}

fn parse_frame_location(text: &str) -> Option<(String, u32)> {
    let mut parts = text.trim().rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some((file.to_string(), line))
}
