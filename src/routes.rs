//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`           - Shorten a URL
//! - `GET  /analytics/{code}`  - Access analytics for a short code
//! - `GET  /health`            - Health check
//! - `GET  /{code}`            - Short link redirect, also `/{short_host}/{code}`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The redirect route is a catch-all; static routes take precedence over it.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::routes())
        .route("/{*path}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
