//! Handler for per-code access analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::{AccessLogInfo, AnalyticsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the access count and access log for a short code.
///
/// # Endpoint
///
/// `GET /analytics/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_url": "https://short.ly/a1b2c3d4",
///   "short_code": "a1b2c3d4",
///   "access_count": 2,
///   "access_logs": [
///     { "timestamp": "2025-06-01T12:00:00Z", "ip_address": "203.0.113.7" },
///     { "timestamp": "2025-06-01T12:05:00Z", "ip_address": "198.51.100.2" }
///   ]
/// }
/// ```
///
/// Codes without a mapping are not an error: their logged accesses (possibly
/// none) are returned.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.analytics_service.get_analytics(&code).await?;

    Ok(Json(AnalyticsResponse {
        short_url: state.link_service.short_url(&analytics.short_code),
        short_code: analytics.short_code,
        access_count: analytics.access_count,
        access_logs: analytics
            .entries
            .into_iter()
            .map(AccessLogInfo::from)
            .collect(),
    }))
}
