// ABOUTME: Timestamp parsing for the date strings carried by feed entries and lookup results.
// ABOUTME: Accepts RFC 3339 (Atom, lookup JSON) and RFC 2822 forms, returning UTC.

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a catalog date string into UTC.
///
/// Returns None for empty or unrecognized input; callers keep the raw string.
pub fn parse_feed_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Bare date: "2024-01-15"
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_atom_offsets() {
        let dt = parse_feed_time("2024-01-15T10:00:00-07:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 17, 0, 0).unwrap());
    }

    #[test]
    fn parses_lookup_zulu() {
        let dt = parse_feed_time("2010-10-06T07:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2010, 10, 6, 7, 0, 0).unwrap());
    }

    #[test]
    fn parses_bare_date_and_rfc2822() {
        assert_eq!(
            parse_feed_time("2024-01-15"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_feed_time("Mon, 15 Jan 2024 10:00:00 +0000"),
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_labels_and_empty() {
        assert!(parse_feed_time("").is_none());
        assert!(parse_feed_time("   ").is_none());
        assert!(parse_feed_time("January 15, 2024").is_none());
    }
}
