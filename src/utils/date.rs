use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

/// Length of the year used to express analyzed spans.
pub const DAYS_PER_YEAR: f64 = 365.25;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date or a date-time.
///
/// Supports:
/// - YYYY-MM-DD (midnight)
/// - YYYY-MM-DD HH:MM[:SS[.f]] (also with `T` as separator)
/// - RFC 3339 (converted to UTC)
pub fn parse_datetime(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_hms_opt(0, 0, 0).unwrap_or_default());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Text form of stored timestamps. Sub-second digits appear only when
/// non-zero (3, 6 or 9 of them), which keeps text order equal to time order.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format used when storing timestamps as text (SQLite).
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// `(end - start)` expressed in 365.25-day years.
pub fn years_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let span: TimeDelta = end - start;
    span.num_seconds() as f64 / (DAYS_PER_YEAR * 86_400.0)
}

/// Midnight of the day containing `dt`.
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_hms_opt(0, 0, 0).unwrap_or(dt)
}
