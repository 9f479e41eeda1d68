//! Input URL validation and redirect target encoding.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Schemes accepted for shortening. Matched literally and case-sensitively.
const ALLOWED_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Returns true iff `url` begins with `http://` or `https://`.
///
/// This is a literal prefix check: no parsing, no normalization and no
/// reachability check. `HTTP://example.com` is rejected.
pub fn is_valid_url(url: &str) -> bool {
    ALLOWED_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// Bytes escaped in a `Location` value. Reserved URI characters and `%`
/// pass through unchanged; non-ASCII bytes are always escaped.
const LOCATION_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes a stored URL so it is always a valid header value.
///
/// Already-escaped sequences are left alone, so `https://x/a%20b` is
/// returned unchanged while `https://x/a b` becomes `https://x/a%20b`.
pub fn to_redirect_location(url: &str) -> String {
    utf8_percent_encode(url, LOCATION_ESCAPES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_url("http://x"));
        assert!(is_valid_url("https://example.com/page"));
    }

    #[test]
    fn test_prefix_only_no_parsing() {
        assert!(is_valid_url("http://"));
        assert!(is_valid_url("https://not a real host"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(!is_valid_url("ftp://x"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!is_valid_url("HTTP://example.com"));
        assert!(!is_valid_url("Https://example.com"));
    }

    #[test]
    fn test_leading_whitespace_rejected() {
        assert!(!is_valid_url(" https://example.com"));
    }

    #[test]
    fn test_location_keeps_plain_urls() {
        let url = "https://example.com/a/b?q=1&r=%20#frag";
        assert_eq!(to_redirect_location(url), url);
    }

    #[test]
    fn test_location_escapes_control_and_non_ascii() {
        assert_eq!(
            to_redirect_location("https://example.com/a\nb"),
            "https://example.com/a%0Ab"
        );
        assert_eq!(
            to_redirect_location("https://example.com/caf\u{e9} x"),
            "https://example.com/caf%C3%A9%20x"
        );
    }
}
