//! Timestamp representation, parsing and clock selection.
//!
//! # Responsibility
//! - Parse ISO-8601-like timestamp strings into the canonical representation.
//! - Render timestamps in the fixed, lexicographically sortable export format.
//! - Provide the "current instant" used by classification queries.
//!
//! # Invariants
//! - Timestamps are naive wall-clock values; no timezone conversion happens.
//! - `format_timestamp` output sorts the same way as the timestamps it renders.
//! - `EPOCH_SENTINEL` only appears at the serialization boundary.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical instant used by every log entry and query.
pub type Timestamp = NaiveDateTime;

/// Export format: `YYYY-MM-DD HH:MM:SS`.
pub const EXPORT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Legacy "not dismissed" marker written by snapshot exports.
pub const EPOCH_SENTINEL: Timestamp = NaiveDateTime::UNIX_EPOCH;

/// Error for timestamp text that matches none of the accepted layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampParseError(pub String);

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid timestamp `{}`", self.0)
    }
}

impl Error for TimestampParseError {}

/// Parses an ISO-8601-like timestamp.
///
/// Accepted layouts (input is trimmed first):
/// - `YYYY-MM-DD HH:MM:SS[.ffffff]` or with a `T` separator
/// - `YYYY-MM-DD HH:MM` or with a `T` separator
/// - `YYYY-MM-DD`, interpreted as midnight
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TimestampParseError> {
    let trimmed = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimestampParseError(trimmed.to_string()))
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(value: Timestamp) -> String {
    value.format(EXPORT_FORMAT).to_string()
}

/// Formats an optional timestamp, materializing `EPOCH_SENTINEL` for `None`.
pub fn format_optional_timestamp(value: Option<Timestamp>) -> String {
    format_timestamp(value.unwrap_or(EPOCH_SENTINEL))
}

/// Source of the reference instant for classification queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Current local wall-clock time.
    #[default]
    System,
    /// Pinned instant, used for replaying a known state.
    Fixed(Timestamp),
}

impl Clock {
    /// Returns the reference instant for this clock.
    pub fn now(&self) -> Timestamp {
        match self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(instant) => *instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_optional_timestamp, format_timestamp, parse_timestamp, Clock, EPOCH_SENTINEL,
    };

    #[test]
    fn parse_accepts_space_and_t_separators() {
        let spaced = parse_timestamp("2025-04-07 10:00:00").unwrap();
        let t_sep = parse_timestamp("2025-04-07T10:00:00").unwrap();
        assert_eq!(spaced, t_sep);
        assert_eq!(format_timestamp(spaced), "2025-04-07 10:00:00");
    }

    #[test]
    fn parse_accepts_date_only_as_midnight() {
        let parsed = parse_timestamp(" 2025-04-01 ").unwrap();
        assert_eq!(format_timestamp(parsed), "2025-04-01 00:00:00");
    }

    #[test]
    fn parse_accepts_minutes_and_fractional_seconds() {
        let minutes = parse_timestamp("2025-04-07 10:30").unwrap();
        assert_eq!(format_timestamp(minutes), "2025-04-07 10:30:00");

        let fractional = parse_timestamp("2025-04-07T10:30:15.250000").unwrap();
        assert_eq!(format_timestamp(fractional), "2025-04-07 10:30:15");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_timestamp("next tuesday").unwrap_err();
        assert!(err.to_string().contains("next tuesday"));
        assert!(parse_timestamp("2025-13-01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn sentinel_renders_as_unix_epoch() {
        assert_eq!(format_timestamp(EPOCH_SENTINEL), "1970-01-01 00:00:00");
        assert_eq!(format_optional_timestamp(None), "1970-01-01 00:00:00");
    }

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let pinned = parse_timestamp("2025-04-07 10:00:00").unwrap();
        assert_eq!(Clock::Fixed(pinned).now(), pinned);
    }
}
