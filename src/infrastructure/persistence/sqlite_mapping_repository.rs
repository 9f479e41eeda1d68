//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::encode_instant;
use crate::utils::timestamp;

#[derive(Debug, FromRow)]
struct MappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: i64,
    expires_at: i64,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(
            row.id,
            row.original_url,
            row.short_code,
            timestamp::from_nanos(row.created_at),
            timestamp::from_nanos(row.expires_at),
        )
    }
}

/// SQLite repository for URL mappings.
///
/// Uses bound parameters for all queries. Each call is one transaction on a
/// connection acquired from the shared pool for the duration of the call.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn create_or_get(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let created_at = encode_instant(new_mapping.created_at)?;
        let expires_at = encode_instant(new_mapping.expires_at)?;

        let mut tx = self.pool.begin().await?;

        // The insert takes the write lock first, so the read below observes
        // whichever writer won for this short code.
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (original_url, short_code, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (short_code) DO NOTHING
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .bind(created_at)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;
        let inserted = result.rows_affected() == 1;

        let row: MappingRow = sqlx::query_as(
            r#"
            SELECT id, original_url, short_code, created_at, expires_at
            FROM url_mappings
            WHERE short_code = ?1
            "#,
        )
        .bind(&new_mapping.short_code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        if row.original_url != new_mapping.original_url {
            tracing::warn!(
                short_code = %new_mapping.short_code,
                "short code already bound to a different URL"
            );
            metrics::counter!("links_collisions_total").increment(1);
            return Err(AppError::collision(
                "Short code is already in use by a different URL",
                json!({ "short_code": new_mapping.short_code }),
            ));
        }

        if inserted {
            tracing::info!(short_code = %row.short_code, "mapping created");
            metrics::counter!("links_created_total").increment(1);
        } else {
            tracing::debug!(short_code = %row.short_code, "mapping already exists");
        }

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row: Option<MappingRow> = sqlx::query_as(
            r#"
            SELECT id, original_url, short_code, created_at, expires_at
            FROM url_mappings
            WHERE short_code = ?1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }
}
