// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coarse human-readable ages ("42s", "17m", "5h", "3d").

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Shown when a timestamp cannot be parsed.
pub const UNKNOWN_AGE: &str = "?";

/// Formats tried after RFC 3339, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d %H:%M:%S"];

/// Parse a timestamp in any of the recognized formats.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format the age of `timestamp` relative to `now`.
///
/// Unparseable timestamps yield [`UNKNOWN_AGE`] instead of an error.
pub fn format_age(timestamp: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(timestamp) {
        Some(created) => format_duration(now - created),
        None => UNKNOWN_AGE.to_string(),
    }
}

/// Bucket a duration into seconds, minutes, hours or days, truncating.
///
/// Negative durations (clock skew) clamp to zero.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 60 * 60 => format!("{}m", s / 60),
        s if s < 24 * 60 * 60 => format!("{}h", s / (60 * 60)),
        s => format!("{}d", s / (24 * 60 * 60)),
    }
}

#[cfg(test)]
#[path = "age_tests.rs"]
mod tests;
