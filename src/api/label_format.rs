use std::fmt::Write as _;

use chrono::Datelike;
use chrono::format::{Item, StrftimeItems};

use crate::core::TimePoint;
use crate::core::time_unit::utc;

/// Placeholder replaced by the quarter number (1-4); strftime has no quarter field.
pub const QUARTER_TOKEN: &str = "{quarter}";

/// Formats `time` (UTC) with a strftime pattern that may contain `{quarter}`.
///
/// Returns `None` for timestamps chrono cannot represent or patterns it
/// cannot render.
#[must_use]
pub fn format_time(time: TimePoint, pattern: &str) -> Option<String> {
    let dt = utc(time)?;
    let quarter = dt.month0() / 3 + 1;
    let pattern = pattern.replace(QUARTER_TOKEN, &quarter.to_string());

    let mut text = String::new();
    write!(text, "{}", dt.format(&pattern)).ok()?;
    Some(text)
}

/// True when chrono understands every specifier in `pattern`.
#[must_use]
pub fn is_valid_pattern(pattern: &str) -> bool {
    let pattern = pattern.replace(QUARTER_TOKEN, "1");
    !StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
}

/// Rough rendered width of `text`, deterministic and backend-independent.
pub(super) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '/' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

#[cfg(test)]
mod tests {
    use super::{estimate_label_text_width_px, format_time, is_valid_pattern};

    // 2020-08-04T17:05:09.123Z
    const SAMPLE: i64 = 1_596_560_709_123;

    #[test]
    fn formats_default_patterns() {
        assert_eq!(
            format_time(SAMPLE, "%-I:%M:%S%.3f %p").as_deref(),
            Some("5:05:09.123 PM")
        );
        assert_eq!(format_time(SAMPLE, "%-I%p").as_deref(), Some("5PM"));
        assert_eq!(format_time(SAMPLE, "%b %-d").as_deref(), Some("Aug 4"));
        assert_eq!(format_time(SAMPLE, "%b %Y").as_deref(), Some("Aug 2020"));
    }

    #[test]
    fn substitutes_quarter_token() {
        assert_eq!(
            format_time(SAMPLE, "Q{quarter} - %Y").as_deref(),
            Some("Q3 - 2020")
        );
    }

    #[test]
    fn invalid_patterns_are_detected_and_do_not_panic() {
        assert!(is_valid_pattern("Q{quarter} %Y"));
        assert!(!is_valid_pattern("%Q"));
        assert_eq!(format_time(SAMPLE, "%Q"), None);
    }

    #[test]
    fn width_estimate_has_a_floor() {
        assert_eq!(estimate_label_text_width_px("", 10.0), 10.0);
        assert!(estimate_label_text_width_px("12:00:00.000 AM", 12.0) > 60.0);
    }
}
