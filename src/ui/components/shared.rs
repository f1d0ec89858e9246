//! Shared component helpers.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Truncates multiline text to a compact single-line preview.
pub fn short_preview(text: &str, max_chars: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= max_chars {
        return normalized;
    }

    if max_chars <= 3 {
        return normalized.chars().take(max_chars).collect();
    }

    let mut out: String = normalized.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Formats an RFC 3339 timestamp as a compact age like "3days ago".
/// Unparseable values come back unchanged.
pub fn short_age(timestamp: &str) -> String {
    short_age_at(timestamp, Utc::now())
}

fn short_age_at(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_owned();
    };

    let age = (now - parsed.with_timezone(&Utc))
        .to_std()
        .unwrap_or(Duration::ZERO);
    if age < Duration::from_secs(60) {
        return "now".to_owned();
    }

    // Drop sub-minute precision, then keep the most significant unit.
    let age = Duration::from_secs(age.as_secs() - age.as_secs() % 60);
    let formatted = humantime::format_duration(age).to_string();
    let unit = formatted.split_whitespace().next().unwrap_or("?");
    format!("{unit} ago")
}

#[cfg(test)]
mod tests {
    use super::{short_age_at, short_preview};
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-04T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn preview_collapses_whitespace_and_truncates() {
        assert_eq!(short_preview("a\n  b   c", 10), "a b c");
        assert_eq!(short_preview("abcdefghij", 6), "abc...");
    }

    #[test]
    fn age_keeps_most_significant_unit() {
        assert_eq!(short_age_at("2026-03-01T12:00:00Z", now()), "3days ago");
        assert_eq!(short_age_at("2026-03-04T09:30:00Z", now()), "2h ago");
        assert_eq!(short_age_at("2026-03-04T11:59:30Z", now()), "now");
    }

    #[test]
    fn future_and_invalid_timestamps_degrade() {
        assert_eq!(short_age_at("2026-04-01T00:00:00Z", now()), "now");
        assert_eq!(short_age_at("yesterday", now()), "yesterday");
    }
}
