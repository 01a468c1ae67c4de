//! Date and time encoding
//!
//! Datetimes travel as ISO-8601 strings. Parsing accepts the formats the
//! browser client and stored configs produce; encoding always emits the
//! canonical form (no zone suffix, microseconds only when present).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Format produced by the client for UTC timestamps
pub const DATETIME_ISOFORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const NAIVE_FORMATS: [&str; 3] = [
    DATETIME_ISOFORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a datetime string, returning `None` if no known format matches
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Canonical ISO-8601 encoding of a datetime
pub fn encode_datetime(dt: &NaiveDateTime) -> String {
    if dt.nanosecond() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Canonical ISO-8601 encoding of a date
pub fn encode_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Datetime that serializes in the canonical encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonDate(pub NaiveDateTime);

impl Serialize for JsonDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_datetime(&self.0))
    }
}

impl From<NaiveDateTime> for JsonDate {
    fn from(dt: NaiveDateTime) -> Self {
        JsonDate(dt)
    }
}

/// Serialize a response payload
///
/// Dates, datetimes and uuids inside `value` come out as ISO-8601 and
/// hyphenated strings through their serde impls; wrap datetimes in
/// [`JsonDate`] for the canonical encoding.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// Timestamp used to name the image directory of one model run
pub fn runtime_stamp(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d-%H-%M-%S").to_string()
}
