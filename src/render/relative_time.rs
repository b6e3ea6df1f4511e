//! Human-relative timestamps ("3 minutes ago", "in an hour").
//!
//! Buckets follow the conventional thresholds used by web log viewers:
//! under 45 seconds is "a few seconds", under 45 minutes counts minutes,
//! under 22 hours counts hours, under 26 days counts days, under 11 months
//! counts months, then years.

use chrono::{DateTime, Utc};

const SECONDS_THRESHOLD: i64 = 45;
const MINUTES_THRESHOLD: i64 = 45;
const HOURS_THRESHOLD: i64 = 22;
const DAYS_THRESHOLD: i64 = 26;
const MONTHS_THRESHOLD: i64 = 11;

/// Render `at` relative to `now`.
pub fn from_now(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = at.signed_duration_since(now).num_milliseconds();
    let phrase = humanize(diff_ms.unsigned_abs() as f64);
    if diff_ms > 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn humanize(abs_ms: f64) -> String {
    let seconds = (abs_ms / 1_000.0).round() as i64;
    let minutes = (abs_ms / 60_000.0).round() as i64;
    let hours = (abs_ms / 3_600_000.0).round() as i64;
    let days = (abs_ms / 86_400_000.0).round() as i64;
    let months = (abs_ms / 86_400_000.0 / 30.436_875).round() as i64;
    let years = (abs_ms / 86_400_000.0 / 365.2425).round() as i64;

    if seconds < SECONDS_THRESHOLD {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < MINUTES_THRESHOLD {
        format!("{} minutes", minutes)
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < HOURS_THRESHOLD {
        format!("{} hours", hours)
    } else if days <= 1 {
        "a day".to_string()
    } else if days < DAYS_THRESHOLD {
        format!("{} days", days)
    } else if months <= 1 {
        "a month".to_string()
    } else if months < MONTHS_THRESHOLD {
        format!("{} months", months)
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{} years", years)
    }
}
