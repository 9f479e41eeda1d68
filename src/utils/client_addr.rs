//! Client address extraction from HTTP requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client address recorded in the access log.
///
/// When `behind_proxy` is false the socket peer address is authoritative.
/// When true, the first entry of `X-Forwarded-For` is used, then `X-Real-IP`,
/// falling back to the peer address if neither header carries a value.
///
/// Forwarding headers are client-controlled; enable `behind_proxy` only when
/// a trusted reverse proxy overwrites them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let addr = client_address(&headers, "10.0.0.1:5000".parse().unwrap(), true);
/// assert_eq!(addr, "203.0.113.7");
/// ```
pub fn client_address(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = header_value(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(addr) = forwarded.or_else(|| header_value(headers, X_REAL_IP)) {
            return addr.to_string();
        }
    }

    peer.ip().to_string()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
