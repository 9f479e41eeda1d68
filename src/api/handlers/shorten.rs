//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ttl::ttl_from_hours;

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "expiry_hours": 24
/// }
/// ```
///
/// `expiry_hours` (alias `ttl_hours`) is optional and may be fractional.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "a1b2c3d4",
///   "short_url": "https://short.ly/a1b2c3d4",
///   "original_url": "https://example.com/some/long/path",
///   "created_at": "2025-06-01T12:00:00Z",
///   "expires_at": "2025-06-02T12:00:00Z"
/// }
/// ```
///
/// Shortening an already shortened URL returns the stored mapping with its
/// original timestamps.
///
/// # Errors
///
/// - 400 `invalid_url` / `invalid_ttl` / `validation_error`
/// - 409 `collision` if the code belongs to a different URL
/// - 503 `store_unavailable`
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let ttl = payload.expiry_hours.map(ttl_from_hours).transpose()?;

    let mapping = state
        .link_service
        .shorten(payload.url_str(), ttl, Utc::now())
        .await?;

    let short_url = state.link_service.short_url(&mapping.short_code);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse::from_mapping(mapping, short_url)),
    ))
}
