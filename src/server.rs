//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, migrations, and the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::pool;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = pool::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    pool::migrate(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let state = AppState::from_config(Arc::new(pool.clone()), &config);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
