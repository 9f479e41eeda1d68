//! Access log entry recorded on each successful resolution.

use chrono::{DateTime, Utc};

/// A single logged access of a short code.
///
/// `short_code` references a mapping by value only. Entries outlive the
/// mapping they refer to and are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub id: i64,
    pub short_code: String,
    pub accessed_at: DateTime<Utc>,
    pub client_address: String,
}

impl AccessLogEntry {
    /// Creates a new AccessLogEntry instance.
    pub fn new(
        id: i64,
        short_code: String,
        accessed_at: DateTime<Utc>,
        client_address: String,
    ) -> Self {
        Self {
            id,
            short_code,
            accessed_at,
            client_address,
        }
    }
}

/// Input data for appending to the access log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessLogEntry {
    pub short_code: String,
    pub accessed_at: DateTime<Utc>,
    pub client_address: String,
}
