//! SQLite repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters. Timestamps are stored in the canonical encoding from
//! [`crate::utils::timestamp`].
//!
//! # Repositories
//!
//! - [`SqliteMappingRepository`] - Mapping storage and lookup
//! - [`SqliteAccessLogRepository`] - Access log append and queries

pub mod pool;
pub mod sqlite_access_log_repository;
pub mod sqlite_mapping_repository;

pub use pool::PoolSettings;
pub use sqlite_access_log_repository::SqliteAccessLogRepository;
pub use sqlite_mapping_repository::SqliteMappingRepository;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;
use crate::utils::timestamp;

/// Encodes an instant for storage, rejecting instants outside the
/// representable range before any I/O.
pub(crate) fn encode_instant(instant: DateTime<Utc>) -> Result<i64, AppError> {
    timestamp::to_nanos(instant).ok_or_else(|| {
        AppError::validation(
            "Timestamp out of representable range",
            json!({ "timestamp": instant.to_rfc3339() }),
        )
    })
}
