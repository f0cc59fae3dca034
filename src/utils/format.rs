//! Formatting utilities for confidences, dates, and relative times.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Format a 0..1 confidence as a whole percentage (0.873 → 87).
pub fn percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Parse an RFC 3339 timestamp (e.g., "2024-05-02T12:00:00Z").
///
/// Timestamps without an offset ("2024-05-02T12:00:00.123456") are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc())
}

/// Parse an ISO calendar date (YYYY-MM-DD).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Format an ISO date from its parts, zero-padded (2024, 5, 1 → "2024-05-01").
pub fn format_iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Format time of day as "HH:MM".
pub fn format_clock<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%H:%M").to_string()
}

/// "HH:MM" for an optional RFC 3339 timestamp, "—" when absent or invalid.
pub fn clock_label(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|t| format_clock(&t))
        .unwrap_or_else(|| "—".to_string())
}

/// Format a date as "May 1".
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), date.day())
}

/// Format a date as "May 1" with the full month name ("September 12").
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%B"), date.day())
}

/// Format a date as "Wednesday, May 1".
pub fn format_weekday_date(date: NaiveDate) -> String {
    format!("{}, {} {}", date.format("%A"), date.format("%B"), date.day())
}

/// Format a month key ("2024-05") as "May 2024".
pub fn format_month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {} ago", count, unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Describe how long ago `then` was, relative to `now`.
///
/// - under a minute: "Just now"
/// - under an hour: "N minute(s) ago"
/// - under a day: "N hour(s) ago"
/// - under a week: "N day(s) ago"
/// - otherwise: "YYYY-MM-DD HH:MM"
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - then;
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else {
        then.format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(0.6), 60);
        assert_eq!(percent(0.875), 88);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn test_parse_timestamp() {
        let t = parse_timestamp("2024-05-02T12:30:00Z").unwrap();
        assert_eq!(format_clock(&t), "12:30");
        let offset = parse_timestamp("2024-05-02T12:30:00+02:00").unwrap();
        assert_eq!(format_clock(&offset), "10:30");
        let naive = parse_timestamp("2024-05-02T08:05:09.123456").unwrap();
        assert_eq!(format_clock(&naive), "08:05");
        assert!(parse_timestamp("yesterday").is_none());
        assert_eq!(clock_label(Some("2024-05-02T12:30:00Z")), "12:30");
        assert_eq!(clock_label(None), "—");
    }

    #[test]
    fn test_dates() {
        let date = parse_date("2024-05-01").unwrap();
        assert_eq!(format_short_date(date), "May 1");
        assert_eq!(format_long_date(date), "May 1");
        assert_eq!(format_weekday_date(date), "Wednesday, May 1");
        assert_eq!(format_long_date(parse_date("2024-09-12").unwrap()), "September 12");
        assert_eq!(format_iso_date(2024, 5, 1), "2024-05-01");
        assert_eq!(format_month_title(2024, 5), "May 2024");
        assert!(parse_date("2024-13-01").is_none());
    }

    #[test]
    fn test_format_relative() {
        let now = parse_timestamp("2024-05-10T12:00:00Z").unwrap();
        assert_eq!(format_relative(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_relative(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_relative(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_relative(now - Duration::hours(23), now), "23 hours ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2 days ago");
        assert_eq!(
            format_relative(now - Duration::days(9), now),
            "2024-05-01 12:00"
        );
    }
}
