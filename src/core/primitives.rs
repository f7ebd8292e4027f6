use chrono::{DateTime, Datelike, TimeZone, Utc};

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts unix seconds back to a UTC timestamp, truncating sub-millisecond detail.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

/// Start of the given calendar year (Jan 1, 00:00 UTC).
#[must_use]
pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}

/// Time-domain value of a year: unix seconds at the start of that year.
#[must_use]
pub fn year_to_unix_seconds(year: i32) -> Option<f64> {
    year_start(year).map(datetime_to_unix_seconds)
}

#[must_use]
pub fn unix_seconds_to_year(seconds: f64) -> Option<i32> {
    unix_seconds_to_datetime(seconds).map(|time| time.year())
}

/// Parses a numeric cell. Blank, non-numeric and non-finite text is absent.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a year cell as a whole number; integral float text such as
/// `"2020.0"` is accepted, fractional years are not.
#[must_use]
pub fn parse_year(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| parse_number(trimmed).and_then(number_to_year))
}

/// Accepts a float only when it carries an exact integer year.
#[must_use]
pub fn number_to_year(value: f64) -> Option<i32> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}
