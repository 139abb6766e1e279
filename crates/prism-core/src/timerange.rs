//! Time-range parsing.
//!
//! Turns relative durations (`7d`, `24h`) or absolute ISO-8601 dates into
//! instants. The duration form is checked first; anything that does not match
//! `<digits><unit>` falls through to ISO parsing, so an absolute date string
//! always wins when both could apply.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::CoreError;

/// Days in the approximated `m` (month) unit.
const DAYS_PER_MONTH: i64 = 30;

/// Parse `input` into an absolute instant relative to `reference`.
///
/// Accepted forms:
/// - `<n><unit>` with unit `h` (hours), `d` (days), `w` (weeks), `m` (months,
///   approximated as exactly 30 days) — resolves to `reference - duration`
/// - an RFC 3339 timestamp (`2024-05-01T12:00:00Z`)
/// - a plain date (`2024-05-01`), taken as midnight UTC
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimeRange`] naming the accepted formats when
/// the input matches neither form.
pub fn parse_time_range(input: &str, reference: DateTime<Utc>) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = input.trim();

    if let Some((magnitude, unit)) = split_magnitude_unit(trimmed) {
        let duration = match unit {
            'h' => Duration::hours(magnitude),
            'd' => Duration::days(magnitude),
            'w' => Duration::weeks(magnitude),
            'm' => Duration::days(magnitude * DAYS_PER_MONTH),
            _ => unreachable!("split_magnitude_unit only yields h/d/w/m"),
        };
        return Ok(reference - duration);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc());
    }

    Err(CoreError::InvalidTimeRange {
        input: input.to_string(),
    })
}

/// Split `<digits><unit>` where unit is one of `h d w m`.
///
/// Returns `None` unless the whole string is digits followed by exactly one
/// unit character.
fn split_magnitude_unit(s: &str) -> Option<(i64, char)> {
    let unit = s.chars().next_back()?;
    if !matches!(unit, 'h' | 'd' | 'w' | 'm') {
        return None;
    }
    let digits = &s[..s.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|magnitude| (magnitude, unit))
}
