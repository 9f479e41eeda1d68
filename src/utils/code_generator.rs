//! Deterministic short code generation.
//!
//! A short code is a pure function of the URL's exact bytes: the first
//! [`CODE_LENGTH`] lowercase hex characters of its SHA-256 digest. No
//! normalization is applied, so case, trailing slashes and query order all
//! produce different codes.
//!
//! The code space is a truncation of the digest, so distinct URLs can
//! collide. Uniqueness is enforced by the mapping store, not here.

use sha2::{Digest, Sha256};

/// Number of hex characters in a short code.
pub const CODE_LENGTH: usize = 8;

/// Derives the short code for `original_url`.
///
/// # Examples
///
/// ```
/// use linkshort::utils::code_generator::generate_code;
///
/// let code = generate_code("https://example.com/page");
/// assert_eq!(code.len(), 8);
/// assert_eq!(code, generate_code("https://example.com/page"));
/// ```
pub fn generate_code(original_url: &str) -> String {
    let digest = Sha256::digest(original_url.as_bytes());
    let mut code = hex::encode(&digest[..CODE_LENGTH / 2]);
    code.truncate(CODE_LENGTH);
    code
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_short_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_deterministic() {
        let url = "https://example.com/some/long/path?a=1&b=2";
        assert_eq!(generate_code(url), generate_code(url));
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code("https://example.com").len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_lowercase_hex() {
        let code = generate_code("https://EXAMPLE.com/Path");
        assert!(is_valid_short_code(&code));
    }

    #[test]
    fn test_generate_code_known_value() {
        // sha256("abc") = ba7816bf8f01cfea...
        assert_eq!(generate_code("abc"), "ba7816bf");
    }

    #[test]
    fn test_generate_code_no_normalization() {
        let base = generate_code("https://example.com/page");

        assert_ne!(base, generate_code("https://example.com/page/"));
        assert_ne!(base, generate_code("https://EXAMPLE.com/page"));
        assert_ne!(
            generate_code("https://example.com/?a=1&b=2"),
            generate_code("https://example.com/?b=2&a=1")
        );
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("0123abcd"));
        assert!(!is_valid_short_code("0123ABCD"));
        assert!(!is_valid_short_code("0123abc"));
        assert!(!is_valid_short_code("0123abcde"));
        assert!(!is_valid_short_code("0123abcg"));
        assert!(!is_valid_short_code(""));
    }
}
