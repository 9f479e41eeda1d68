//! API route configuration.

use crate::api::handlers::{analytics_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create (or fetch) the short link for a URL
/// - `GET  /analytics/{code}` - Access count and log for a short code
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/{code}", get(analytics_handler))
}
