//! Short link creation and lookup service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::ttl;
use crate::utils::url_validator::is_valid_url;

/// Base URL used for rendered short links when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://short.ly/";

/// Service for shortening URLs.
///
/// Validates input before any store interaction, derives the short code
/// deterministically and delegates uniqueness to the store's
/// insert-if-absent operation.
pub struct LinkService<M: MappingRepository> {
    mapping_repository: Arc<M>,
    default_ttl: Duration,
    base_url: String,
}

impl<M: MappingRepository> LinkService<M> {
    /// Creates a new link service with a 24 hour default TTL.
    pub fn new(mapping_repository: Arc<M>) -> Self {
        Self {
            mapping_repository,
            default_ttl: ttl::default_ttl(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the TTL applied when a request carries none.
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Sets the base URL prefixed to short codes in [`Self::short_url`].
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Shortens `original_url`, valid from `now` for `ttl` (or the default TTL).
    ///
    /// Shortening the same URL again returns the existing mapping unchanged;
    /// the first writer's `created_at` and `expires_at` are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if the URL is missing, empty or does
    /// not start with `http://` or `https://`.
    /// Returns [`AppError::InvalidTtl`] if the TTL is not positive or the
    /// resulting expiry cannot be represented.
    /// Returns [`AppError::Collision`] if the generated code is held by a
    /// different URL.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn shorten(
        &self,
        original_url: Option<&str>,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<UrlMapping, AppError> {
        let original_url = original_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::invalid_url("URL is required", json!({})))?;

        if !is_valid_url(original_url) {
            return Err(AppError::invalid_url(
                "URL must start with http:// or https://",
                json!({ "url": original_url }),
            ));
        }

        let expires_at = ttl::expires_at(now, ttl.unwrap_or(self.default_ttl))?;

        let new_mapping = NewUrlMapping {
            original_url: original_url.to_string(),
            short_code: generate_code(original_url),
            created_at: now,
            expires_at,
        };

        self.mapping_repository.create_or_get(new_mapping).await
    }

    /// Retrieves a mapping by short code regardless of expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn get_mapping(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        self.mapping_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "short_code": short_code }))
            })
    }

    /// Renders the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn echo_mapping(new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        Ok(UrlMapping::new(
            1,
            new_mapping.original_url,
            new_mapping.short_code,
            new_mapping.created_at,
            new_mapping.expires_at,
        ))
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockMappingRepository::new();

        let expected_code = generate_code("https://example.com/page");
        mock_repo
            .expect_create_or_get()
            .withf(move |m| {
                m.short_code == expected_code
                    && m.original_url == "https://example.com/page"
                    && m.created_at == t0()
                    && m.expires_at == t0() + Duration::hours(24)
            })
            .times(1)
            .returning(echo_mapping);

        let service = LinkService::new(Arc::new(mock_repo));

        let mapping = service
            .shorten(Some("https://example.com/page"), None, t0())
            .await
            .unwrap();

        assert_eq!(mapping.short_code, generate_code("https://example.com/page"));
        assert_eq!(mapping.expires_at, t0() + Duration::hours(24));
    }

    #[tokio::test]
    async fn test_shorten_with_custom_ttl() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_create_or_get()
            .withf(|m| m.expires_at == t0() + Duration::hours(2))
            .times(1)
            .returning(echo_mapping);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .shorten(Some("http://x"), Some(Duration::hours(2)), t0())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_uses_configured_default_ttl() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_create_or_get()
            .withf(|m| m.expires_at == t0() + Duration::hours(6))
            .times(1)
            .returning(echo_mapping);

        let service = LinkService::new(Arc::new(mock_repo)).with_default_ttl(Duration::hours(6));

        assert!(service.shorten(Some("http://x"), None, t0()).await.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_scheme_before_store() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_create_or_get().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten(Some("ftp://x"), None, t0()).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_shorten_rejects_missing_url() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_create_or_get().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.shorten(None, None, t0()).await.unwrap_err(),
            AppError::InvalidUrl { .. }
        ));
        assert!(matches!(
            service.shorten(Some(""), None, t0()).await.unwrap_err(),
            AppError::InvalidUrl { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_rejects_zero_ttl() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_create_or_get().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .shorten(Some("http://x"), Some(Duration::zero()), t0())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidTtl { .. }));
    }

    #[tokio::test]
    async fn test_shorten_url_checked_before_ttl() {
        let mock_repo = MockMappingRepository::new();
        let service = LinkService::new(Arc::new(mock_repo));

        let result = service
            .shorten(Some("ftp://x"), Some(Duration::zero()), t0())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_shorten_propagates_collision() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_create_or_get()
            .times(1)
            .returning(|m| Err(AppError::collision("taken", json!({ "short_code": m.short_code }))));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten(Some("https://b.example"), None, t0()).await;

        assert!(matches!(result.unwrap_err(), AppError::Collision { .. }));
    }

    #[tokio::test]
    async fn test_get_mapping_not_found() {
        let mut mock_repo = MockMappingRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "deadbeef")
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.get_mapping("deadbeef").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_short_url() {
        let service = LinkService::new(Arc::new(MockMappingRepository::new()));
        assert_eq!(service.short_url("abcd1234"), "https://short.ly/abcd1234");

        let service = LinkService::new(Arc::new(MockMappingRepository::new()))
            .with_base_url("http://localhost:3000");
        assert_eq!(service.short_url("abcd1234"), "http://localhost:3000/abcd1234");
    }
}
