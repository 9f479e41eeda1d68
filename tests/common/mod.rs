#![allow(dead_code)]

use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use linkshort::infrastructure::persistence::{PoolSettings, pool};
use linkshort::state::AppState;
use linkshort::utils::timestamp;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::Layer;

pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = pool::connect_in_memory().await.unwrap();
    pool::migrate(&pool).await.unwrap();
    pool
}

/// File-backed database opened the way the server opens it (WAL, busy
/// timeout, several connections). Keep the `TempDir` alive for the test.
pub async fn file_pool() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("linkshort.db").display());

    let pool = pool::connect(&url, &PoolSettings::default()).await.unwrap();
    pool::migrate(&pool).await.unwrap();
    (dir, pool)
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool)).with_short_host("short.ly")
}

pub async fn insert_mapping(
    pool: &SqlitePool,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO url_mappings (original_url, short_code, created_at, expires_at) VALUES (?, ?, ?, ?)",
    )
    .bind(url)
    .bind(code)
    .bind(timestamp::to_nanos(created_at).unwrap())
    .bind(timestamp::to_nanos(expires_at).unwrap())
    .execute(pool)
    .await
    .unwrap();
}

pub async fn delete_mapping(pool: &SqlitePool, code: &str) {
    sqlx::query("DELETE FROM url_mappings WHERE short_code = ?")
        .bind(code)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_accesses(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM access_logs WHERE short_code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
