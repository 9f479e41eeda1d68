//! Access analytics aggregation service.

use std::sync::Arc;

use crate::domain::entities::AccessLogEntry;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// Aggregated access data for one short code.
///
/// `access_count` always equals `entries.len()`. Entries are in log order,
/// which is not necessarily timestamp order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub short_code: String,
    pub access_count: usize,
    pub entries: Vec<AccessLogEntry>,
}

impl Analytics {
    fn from_entries(short_code: &str, entries: Vec<AccessLogEntry>) -> Self {
        Self {
            short_code: short_code.to_string(),
            access_count: entries.len(),
            entries,
        }
    }
}

/// Service computing analytics from the access log.
///
/// Works purely on the log: a short code whose mapping was removed, or never
/// existed, yields its logged entries (possibly none) rather than an error.
pub struct AnalyticsService<A: AccessLogRepository> {
    access_log_repository: Arc<A>,
}

impl<A: AccessLogRepository> AnalyticsService<A> {
    /// Creates a new analytics service.
    pub fn new(access_log_repository: Arc<A>) -> Self {
        Self {
            access_log_repository,
        }
    }

    /// Returns the access count and raw log entries for `short_code`.
    ///
    /// Count and entries come from a single read, so they cannot disagree.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn get_analytics(&self, short_code: &str) -> Result<Analytics, AppError> {
        let entries = self.access_log_repository.list_by_code(short_code).await?;

        Ok(Analytics::from_entries(short_code, entries))
    }
}
