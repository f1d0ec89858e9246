use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Sort key for `created_at`. Parseable instants order chronologically and
/// sort ahead of unparseable text, which falls back to lexical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum CreatedAtKey {
    Instant(DateTime<Utc>),
    Raw(String),
}

pub(super) fn created_at_key(raw: &str) -> CreatedAtKey {
    let trimmed = raw.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(trimmed) {
        return CreatedAtKey::Instant(value.with_timezone(&Utc));
    }

    // Server timestamps without an offset are taken as UTC.
    for format in NAIVE_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
            return CreatedAtKey::Instant(value.and_utc());
        }
    }

    CreatedAtKey::Raw(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{CreatedAtKey, created_at_key};

    #[test]
    fn offsets_are_normalized() {
        assert_eq!(
            created_at_key("2026-03-01T10:00:00+09:00"),
            created_at_key("2026-03-01T01:00:00Z")
        );
    }

    #[test]
    fn naive_timestamps_parse_as_utc() {
        assert_eq!(
            created_at_key("2026-03-01T01:00:00.250"),
            created_at_key("2026-03-01T01:00:00.250Z")
        );
    }

    #[test]
    fn unparseable_text_sorts_after_instants() {
        let raw = created_at_key("yesterday");
        assert_eq!(raw, CreatedAtKey::Raw("yesterday".to_owned()));
        assert!(created_at_key("2026-03-01T01:00:00Z") < raw);
    }
}
