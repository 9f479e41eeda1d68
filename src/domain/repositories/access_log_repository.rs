//! Repository trait for the append-only access log.

use crate::domain::entities::{AccessLogEntry, NewAccessLogEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for access log entries.
///
/// Entries reference mappings by short code value only; appending never
/// checks that the mapping still exists.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteAccessLogRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Appends an entry to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn append(&self, entry: NewAccessLogEntry) -> Result<AccessLogEntry, AppError>;

    /// Lists all entries for a short code in log (insertion) order.
    ///
    /// Log order is not guaranteed to be timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn list_by_code(&self, short_code: &str) -> Result<Vec<AccessLogEntry>, AppError>;
}
