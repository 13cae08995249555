//! Timestamp text codec.
//!
//! # Responsibility
//! - Render note timestamps as `YYYY-MM-DD HH:MM:SS` text for storage.
//! - Parse stored text back, surfacing malformed values as errors.
//!
//! # Invariants
//! - Second precision, no timezone.
//! - `deserialize_date(&serialize_date(x)) == truncate_to_seconds(x)`.

use chrono::{NaiveDateTime, Timelike};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage pattern for note dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Stored timestamp text that does not match [`DATE_FORMAT`].
///
/// Indicates store corruption; callers must not substitute a default.
/// `source` is `None` when chrono accepted the text but it is not in the
/// canonical zero-padded shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatError {
    pub value: String,
    pub source: Option<chrono::ParseError>,
}

impl Display for DateFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(err) => write!(f, "invalid date format `{}`: {err}", self.value),
            None => write!(
                f,
                "invalid date format `{}`: expected YYYY-MM-DD HH:MM:SS",
                self.value
            ),
        }
    }
}

impl Error for DateFormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

pub fn serialize_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses stored date text. Only the exact output of [`serialize_date`] is
/// accepted; chrono alone tolerates unpadded fields, signs and extra spaces.
pub fn deserialize_date(value: &str) -> Result<NaiveDateTime, DateFormatError> {
    let parsed =
        NaiveDateTime::parse_from_str(value, DATE_FORMAT).map_err(|source| DateFormatError {
            value: value.to_string(),
            source: Some(source),
        })?;
    if serialize_date(parsed) != value {
        return Err(DateFormatError {
            value: value.to_string(),
            source: None,
        });
    }
    Ok(parsed)
}

/// Drops the sub-second component, matching what storage keeps.
pub fn truncate_to_seconds(date: NaiveDateTime) -> NaiveDateTime {
    date.with_nanosecond(0).unwrap_or(date)
}
