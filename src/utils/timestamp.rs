//! Canonical instant encoding for the store.
//!
//! Timestamps are persisted as signed 64-bit nanoseconds since the Unix
//! epoch. There is exactly one encoding, so reads never need format
//! fallbacks and comparisons keep full nanosecond precision. The
//! representable range is roughly 1677-09-21 to 2262-04-11.

use chrono::{DateTime, Utc};

/// Encodes an instant, or `None` if it lies outside the representable range.
pub fn to_nanos(instant: DateTime<Utc>) -> Option<i64> {
    instant.timestamp_nanos_opt()
}

/// Decodes a stored instant.
pub fn from_nanos(nanos: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(nanos)
}
