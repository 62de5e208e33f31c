//! Clock-face time formatting and its inverse.
//!
//! Durations are rendered as `MM:SS.CC`. The minutes field is zero-padded to
//! two digits but never capped, so a run past 99 minutes widens the field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::Millis;

static CLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,}):(\d{2})\.(\d{2})$").unwrap());

/// Broken-down display fields for a duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParts {
    pub minutes: String,
    pub seconds: String,
    pub centiseconds: String,
    /// Canonical `MM:SS.CC` string.
    pub full: String,
}

/// Zero-pad to at least two digits.
pub fn pad(n: u64) -> String {
    format!("{:02}", n)
}

/// Break a duration down into minutes, seconds and centiseconds.
///
/// Negative (and NaN) input is clamped to zero. Every field truncates; nothing
/// rounds up, so 59_999.9 ms reads `00:59.99`.
pub fn format_time(ms: Millis) -> TimeParts {
    let ms = if ms.is_nan() { 0.0 } else { ms.max(0.0) };
    let whole = ms.floor() as u64;

    let min = whole / 60_000;
    let sec = (whole % 60_000) / 1_000;
    let cen = (whole % 1_000) / 10;

    TimeParts {
        minutes: pad(min),
        seconds: pad(sec),
        centiseconds: pad(cen),
        full: format!("{}:{}.{}", pad(min), pad(sec), pad(cen)),
    }
}

/// Shorthand for `format_time(ms).full`.
pub fn format_clock(ms: Millis) -> String {
    format_time(ms).full
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    EmptyInput,
    InvalidFormat(String),
    InvalidSeconds(u32),
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeParseError::EmptyInput => write!(f, "Time cannot be empty"),
            TimeParseError::InvalidFormat(input) => {
                write!(f, "Invalid time '{}', expected MM:SS.CC", input)
            }
            TimeParseError::InvalidSeconds(s) => {
                write!(f, "Invalid seconds: {} (must be 0-59)", s)
            }
        }
    }
}

impl std::error::Error for TimeParseError {}

/// Parse a canonical `MM:SS.CC` string back into milliseconds.
///
/// The result has centisecond resolution; whatever `format_time` truncated is
/// gone.
pub fn parse_clock(input: &str) -> Result<Millis, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::EmptyInput);
    }

    let captures = CLOCK_REGEX
        .captures(trimmed)
        .ok_or_else(|| TimeParseError::InvalidFormat(trimmed.to_string()))?;

    let field = |i: usize| -> Result<u64, TimeParseError> {
        captures[i]
            .parse::<u64>()
            .map_err(|_| TimeParseError::InvalidFormat(trimmed.to_string()))
    };
    let minutes = field(1)?;
    let seconds = field(2)?;
    let centiseconds = field(3)?;

    if seconds > 59 {
        return Err(TimeParseError::InvalidSeconds(seconds as u32));
    }

    minutes
        .checked_mul(60_000)
        .and_then(|ms| ms.checked_add(seconds * 1_000 + centiseconds * 10))
        .map(|ms| ms as Millis)
        .ok_or_else(|| TimeParseError::InvalidFormat(trimmed.to_string()))
}
