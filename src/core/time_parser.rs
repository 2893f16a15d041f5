use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::{TimeInput, TimePoint};

/// Converts a raw label or point value into a time point.
///
/// `None` means the input is not a valid time and must be dropped.
pub trait TimeParser: Send + Sync {
    fn parse(&self, input: &TimeInput) -> Option<TimePoint>;
}

impl<F> TimeParser for F
where
    F: Fn(&TimeInput) -> Option<TimePoint> + Send + Sync,
{
    fn parse(&self, input: &TimeInput) -> Option<TimePoint> {
        self(input)
    }
}

const FALLBACK_DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Default parser: numbers are epoch milliseconds, text is read as UTC.
///
/// With a pattern, text must match it (date-time first, then date-only).
/// Without one, RFC 3339, a few ISO 8601 date-time shapes and `%Y-%m-%d`
/// are accepted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ChronoTimeParser {
    pattern: Option<String>,
}

impl ChronoTimeParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn parse_text(&self, text: &str) -> Option<TimePoint> {
        let text = text.trim();
        if let Some(pattern) = self.pattern.as_deref() {
            return parse_with_pattern(text, pattern);
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.timestamp_millis());
        }
        FALLBACK_DATETIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .map(|naive| naive.and_utc().timestamp_millis())
            .or_else(|| parse_date_only(text, "%Y-%m-%d"))
    }
}

impl fmt::Debug for ChronoTimeParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChronoTimeParser")
            .field("pattern", &self.pattern)
            .finish()
    }
}

impl TimeParser for ChronoTimeParser {
    fn parse(&self, input: &TimeInput) -> Option<TimePoint> {
        match input {
            TimeInput::Millis(millis) => Some(*millis),
            TimeInput::Text(text) => self.parse_text(text),
            TimeInput::Invalid => None,
        }
    }
}

fn parse_with_pattern(text: &str, pattern: &str) -> Option<TimePoint> {
    if let Ok(parsed) = DateTime::parse_from_str(text, pattern) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
        return Some(naive.and_utc().timestamp_millis());
    }
    parse_date_only(text, pattern)
}

fn parse_date_only(text: &str, pattern: &str) -> Option<TimePoint> {
    let date = NaiveDate::parse_from_str(text, pattern).ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
