//! Lenient timestamp parsing for stored ISO-8601 strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 timestamp into wall-clock time.
///
/// Accepts RFC 3339 (offset kept as local wall time), offset-less
/// date-times with or without seconds, and bare dates (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Hour of day (0-23) of a timestamp
pub fn hour_of(value: &str) -> Option<u32> {
    parse_timestamp(value).map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-01-01T08:30:00Z", Some(8))]
    #[case("2024-01-01T08:30:00.000Z", Some(8))]
    #[case("2024-01-01T22:15:00+02:00", Some(22))]
    #[case("2024-01-01T07:05", Some(7))]
    #[case("2024-01-01T07:05:09", Some(7))]
    #[case("2024-01-01", Some(0))]
    #[case("yesterday", None)]
    fn hours(#[case] value: &str, #[case] hour: Option<u32>) {
        assert_eq!(hour_of(value), hour);
    }
}
