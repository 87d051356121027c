use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::fmt::{self, Write};

/// Display format used by the timeline (pt-BR style day/month/year)
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Returns the part of a timestamp before the first `T`, or the whole string
pub fn date_portion(timestamp: &str) -> &str {
    match timestamp.split_once('T') {
        Some((date, _)) => date,
        None => timestamp,
    }
}

/// Parses a counter the lenient way: leading whitespace and an optional `+`,
/// then the leading run of ASCII digits. Anything else yields 0.
pub fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(0)
}

/// Checks that every specifier in a chrono format string is known
pub fn validate_timestamp_format(format: &str) -> Result<(), String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid timestamp format `{}`", format));
    }
    Ok(())
}

// chrono reports a bad specifier as fmt::Error at write time
fn render_or(formatted: impl fmt::Display, fallback: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", formatted) {
        Ok(()) => out,
        Err(_) => fallback.to_string(),
    }
}

/// Formats a timestamp string for display using the given chrono format.
/// Supports ISO 8601 with or without offset, space-separated datetimes and plain dates.
pub fn format_timestamp_local(timestamp_str: &str, format: &str) -> String {
    if timestamp_str.is_empty() {
        return String::new();
    }

    // With an explicit offset (e.g. "2025-12-16T10:30:00Z"): shown in the viewer's zone
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp_str) {
        return render_or(dt.with_timezone(&Local).format(format), timestamp_str);
    }

    // Without an offset the wall-clock time is shown as written
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(timestamp_str, pattern) {
            return render_or(naive_dt.format(format), timestamp_str);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(timestamp_str, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return render_or(midnight.format(format), timestamp_str);
        }
    }

    // Last resort for looser inputs ("Dec 25 2023 10:00", unix seconds, ...)
    if let Ok(dt) = dateparser::parse(timestamp_str) {
        return render_or(dt.with_timezone(&Local).format(format), timestamp_str);
    }

    // If parsing fails, return the original string
    timestamp_str.to_string()
}
