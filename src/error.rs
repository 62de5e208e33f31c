use std::fmt;

use crate::timefmt::TimeParseError;

// Timing itself never fails; these cover export, log parsing and the DOM
// hand-off.
#[derive(Debug)]
pub enum ChronosError {
    /// Export was asked for with no laps recorded.
    EmptyLedger,
    Csv(String),
    Utf8,
    /// A lap log row held a time that is not `MM:SS.CC`.
    Time {
        line: usize,
        source: TimeParseError,
    },
    /// A lap log parsed but its laps are out of order.
    InvalidLog(String),
    /// Restoring a log needs the clock stopped.
    Running,
    /// A browser object the widget needs was missing or refused the call.
    Dom(&'static str),
}

impl fmt::Display for ChronosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChronosError::EmptyLedger => write!(f, "No laps recorded, nothing to export"),
            ChronosError::Csv(msg) => write!(f, "CSV error: {}", msg),
            ChronosError::Utf8 => write!(f, "Exported table was not valid UTF-8"),
            ChronosError::Time { line, source } => write!(f, "{} on line {}", source, line),
            ChronosError::InvalidLog(msg) => write!(f, "Invalid lap log: {}", msg),
            ChronosError::Running => write!(f, "Pause the clock before restoring a log"),
            ChronosError::Dom(what) => write!(f, "Browser call failed: {}", what),
        }
    }
}

impl std::error::Error for ChronosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChronosError::Time { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for ChronosError {
    fn from(e: csv::Error) -> Self {
        ChronosError::Csv(e.to_string())
    }
}
