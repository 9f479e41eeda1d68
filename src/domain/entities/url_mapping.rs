//! URL mapping entity: a short code bound to its original URL.

use chrono::{DateTime, Utc};

/// A persisted short code to URL mapping.
///
/// Mappings are created once and never mutated. `expires_at` is always
/// greater than or equal to `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the mapping is past its expiry at `now`.
    ///
    /// The boundary is inclusive of validity: at exactly `expires_at` the
    /// mapping still resolves.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Input data for creating a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
