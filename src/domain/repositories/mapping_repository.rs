//! Repository trait for short code mappings.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL mappings.
///
/// The store is the single authority on short code uniqueness. Mappings are
/// immutable once written.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts the mapping if its short code is free, otherwise returns the
    /// stored mapping when it points at the same URL.
    ///
    /// Linearizable per short code: among concurrent callers exactly one
    /// `(original_url, created_at, expires_at)` triple wins and every caller
    /// observes it. An existing mapping is never modified, so a repeated
    /// shorten does not reset the expiry clock.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Collision`] if the short code is held by a
    /// different URL.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create_or_get(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by exact short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;
}
