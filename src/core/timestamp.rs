//! Unix timestamp conversion
//!
//! Parses second or millisecond timestamps typed by the user, checks that
//! they fall between the epoch and 2100-01-01, and renders them as
//! calendar dates in a chosen time zone.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Latest accepted instant, 2100-01-01 00:00:00 UTC, in seconds.
pub const MAX_TIMESTAMP_SECS: f64 = 4_102_444_800.0;

/// Default rendering of converted timestamps
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit of a raw timestamp value
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum TimestampUnit {
    #[strum(to_string = "seconds", serialize = "s", serialize = "secs")]
    Seconds,
    #[default]
    #[strum(to_string = "milliseconds", serialize = "ms", serialize = "millis")]
    Milliseconds,
}

impl TimestampUnit {
    pub const fn is_milliseconds(self) -> bool {
        matches!(self, TimestampUnit::Milliseconds)
    }

    pub const fn from_milliseconds_flag(is_milliseconds: bool) -> Self {
        if is_milliseconds {
            TimestampUnit::Milliseconds
        } else {
            TimestampUnit::Seconds
        }
    }

    fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimestampUnit::Seconds => value,
            TimestampUnit::Milliseconds => value / 1000.0,
        }
    }
}

/// Timestamp conversion failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Timestamp is empty")]
    Empty,

    #[error("Invalid timestamp format: {0:?}")]
    InvalidFormat(String),

    #[error("Timestamp out of range (1970-01-01 to 2100-01-01): {0}")]
    OutOfRange(String),

    #[error("Invalid date format string: {0:?}")]
    InvalidDateFormat(String),
}

/// The current instant rendered both ways
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentTime {
    pub formatted: String,
    pub millis: u64,
}

/// Parses a raw timestamp into a UTC instant.
///
/// Surrounding whitespace is ignored. Fractional values are kept down to
/// the nanosecond.
///
/// # Errors
///
/// - [`TimestampError::Empty`] for blank input
/// - [`TimestampError::InvalidFormat`] if the input is not a finite number
/// - [`TimestampError::OutOfRange`] before 1970 or after 2100-01-01
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_timestamp(input: &str, unit: TimestampUnit) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| TimestampError::InvalidFormat(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(TimestampError::InvalidFormat(trimmed.to_string()));
    }

    let seconds = unit.to_seconds(value);
    if !(0.0..=MAX_TIMESTAMP_SECS).contains(&seconds) {
        return Err(TimestampError::OutOfRange(trimmed.to_string()));
    }

    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
        .ok_or_else(|| TimestampError::OutOfRange(trimmed.to_string()))
}

/// Checks that chrono can render every specifier in `format`.
///
/// # Errors
///
/// Returns [`TimestampError::InvalidDateFormat`] for empty or malformed formats.
pub fn validate_date_format(format: &str) -> Result<(), TimestampError> {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(TimestampError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

/// Renders an instant in the given time zone.
///
/// `format` must have passed [`validate_date_format`].
pub fn format_datetime<Tz>(dt: &DateTime<Utc>, tz: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.with_timezone(tz).format(format).to_string()
}

/// Parses and renders a raw timestamp in one step.
///
/// # Errors
///
/// See [`parse_timestamp`] and [`validate_date_format`].
pub fn convert_timestamp<Tz>(
    input: &str,
    unit: TimestampUnit,
    tz: &Tz,
    format: &str,
) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    validate_date_format(format)?;
    let dt = parse_timestamp(input, unit)?;
    tracing::debug!("Converted timestamp {} ({unit}) to {dt}", input.trim());
    Ok(format_datetime(&dt, tz, format))
}

/// [`convert_timestamp`] in the local time zone with the default format.
///
/// # Errors
///
/// See [`parse_timestamp`].
pub fn convert_timestamp_local(input: &str, unit: TimestampUnit) -> Result<String, TimestampError> {
    convert_timestamp(input, unit, &Local, DEFAULT_DATE_FORMAT)
}

/// Renders `now` as a date string in `tz` and as a millisecond timestamp.
pub fn current_time<Tz>(tz: &Tz, now: DateTime<Utc>, format: &str) -> CurrentTime
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    CurrentTime {
        formatted: format_datetime(&now, tz, format),
        millis: u64::try_from(now.timestamp_millis()).unwrap_or(0),
    }
}
