//! SQLite implementation of the access log repository.

use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{AccessLogEntry, NewAccessLogEntry};
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::encode_instant;
use crate::utils::timestamp;

#[derive(Debug, FromRow)]
struct AccessLogRow {
    id: i64,
    short_code: String,
    accessed_at: i64,
    client_address: String,
}

impl From<AccessLogRow> for AccessLogEntry {
    fn from(row: AccessLogRow) -> Self {
        AccessLogEntry::new(
            row.id,
            row.short_code,
            timestamp::from_nanos(row.accessed_at),
            row.client_address,
        )
    }
}

/// SQLite repository for the append-only access log.
///
/// The surrogate `id` is auto-incrementing, so ordering by it yields log
/// order independent of client-supplied timestamps.
pub struct SqliteAccessLogRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAccessLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogRepository for SqliteAccessLogRepository {
    async fn append(&self, entry: NewAccessLogEntry) -> Result<AccessLogEntry, AppError> {
        let accessed_at = encode_instant(entry.accessed_at)?;

        let row: AccessLogRow = sqlx::query_as(
            r#"
            INSERT INTO access_logs (short_code, accessed_at, client_address)
            VALUES (?1, ?2, ?3)
            RETURNING id, short_code, accessed_at, client_address
            "#,
        )
        .bind(&entry.short_code)
        .bind(accessed_at)
        .bind(&entry.client_address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_by_code(&self, short_code: &str) -> Result<Vec<AccessLogEntry>, AppError> {
        let rows: Vec<AccessLogRow> = sqlx::query_as(
            r#"
            SELECT id, short_code, accessed_at, client_address
            FROM access_logs
            WHERE short_code = ?1
            ORDER BY id ASC
            "#,
        )
        .bind(short_code)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AccessLogEntry::from).collect())
    }
}
