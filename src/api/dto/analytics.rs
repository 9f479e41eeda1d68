//! DTOs for access analytics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::AccessLogEntry;

/// One logged access.
#[derive(Debug, Serialize)]
pub struct AccessLogInfo {
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
}

impl From<AccessLogEntry> for AccessLogInfo {
    fn from(entry: AccessLogEntry) -> Self {
        Self {
            timestamp: entry.accessed_at,
            ip_address: entry.client_address,
        }
    }
}

/// Access count and log for a short code, in log order.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub short_url: String,
    pub short_code: String,
    pub access_count: usize,
    pub access_logs: Vec<AccessLogInfo>,
}
