//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_addr::client_address;
use crate::utils::code_generator::is_valid_short_code;
use crate::utils::url_validator::to_redirect_location;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}` or `GET /{short_host}/{code}`
///
/// The configured short host may prefix the code, so a client that pastes
/// the whole short URL after the slash (`/short.ly/a1b2c3d4`) still resolves.
///
/// # Request Flow
///
/// 1. Strip the optional short host prefix
/// 2. Reject paths that cannot be a short code
/// 3. Resolve the code, recording the access
/// 4. Return 302 Found, with characters that are not allowed in a header
///    percent-encoded in `Location`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let code = strip_short_host(&path, state.short_host.as_deref());

    if !is_valid_short_code(code) {
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "short_code": code }),
        ));
    }

    let client = client_address(&headers, addr, state.behind_proxy);

    let original_url = state
        .resolution_service
        .resolve(code, &client, Utc::now())
        .await?;

    let location = HeaderValue::try_from(to_redirect_location(&original_url)).map_err(|_| {
        tracing::error!(short_code = code, "encoded redirect target is not a valid header");
        AppError::invalid_url(
            "Stored URL cannot be used as a redirect target",
            json!({ "short_code": code }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

fn strip_short_host<'a>(path: &'a str, short_host: Option<&str>) -> &'a str {
    let path = path.trim_start_matches('/');

    short_host
        .and_then(|host| path.strip_prefix(host))
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}
