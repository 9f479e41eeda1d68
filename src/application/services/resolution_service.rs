//! Short code resolution with expiry policy and access logging.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewAccessLogEntry, UrlMapping};
use crate::domain::repositories::{AccessLogRepository, MappingRepository};
use crate::error::AppError;

/// Terminal state of a looked-up short code at a given instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Valid(UrlMapping),
    Expired(UrlMapping),
    NotFound,
}

impl Resolution {
    /// Applies the expiry policy to a lookup result.
    ///
    /// A mapping expires strictly after `expires_at`; at exactly
    /// `expires_at` it is still valid.
    pub fn classify(mapping: Option<UrlMapping>, now: DateTime<Utc>) -> Self {
        match mapping {
            None => Resolution::NotFound,
            Some(m) if m.is_expired_at(now) => Resolution::Expired(m),
            Some(m) => Resolution::Valid(m),
        }
    }

    /// Label used for the `resolutions_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Valid(_) => "valid",
            Resolution::Expired(_) => "expired",
            Resolution::NotFound => "not_found",
        }
    }
}

/// Service resolving short codes back to their original URL.
///
/// Every successful resolution appends an access log entry before the URL
/// is returned. Logging is best-effort: an append failure is logged and
/// counted but never turns a successful resolution into an error.
pub struct ResolutionService<M: MappingRepository, A: AccessLogRepository> {
    mapping_repository: Arc<M>,
    access_log_repository: Arc<A>,
}

impl<M: MappingRepository, A: AccessLogRepository> ResolutionService<M, A> {
    /// Creates a new resolution service.
    pub fn new(mapping_repository: Arc<M>, access_log_repository: Arc<A>) -> Self {
        Self {
            mapping_repository,
            access_log_repository,
        }
    }

    /// Resolves `short_code` at instant `now` on behalf of `client_address`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has this code.
    /// Returns [`AppError::Expired`] if `now` is past the mapping's expiry;
    /// no access is logged in that case.
    /// Returns [`AppError::StoreUnavailable`] if the lookup itself fails.
    pub async fn resolve(
        &self,
        short_code: &str,
        client_address: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let mapping = self.mapping_repository.find_by_code(short_code).await?;
        let resolution = Resolution::classify(mapping, now);

        metrics::counter!("resolutions_total", "outcome" => resolution.outcome()).increment(1);

        match resolution {
            Resolution::NotFound => Err(AppError::not_found(
                "Short link not found",
                json!({ "short_code": short_code }),
            )),
            Resolution::Expired(mapping) => {
                tracing::debug!(short_code, expires_at = %mapping.expires_at, "short link expired");
                Err(AppError::expired(
                    "Short link has expired",
                    json!({
                        "short_code": short_code,
                        "expires_at": mapping.expires_at.to_rfc3339(),
                    }),
                ))
            }
            Resolution::Valid(mapping) => {
                self.log_access(short_code, client_address, now).await;
                Ok(mapping.original_url)
            }
        }
    }

    async fn log_access(&self, short_code: &str, client_address: &str, now: DateTime<Utc>) {
        let entry = NewAccessLogEntry {
            short_code: short_code.to_string(),
            accessed_at: now,
            client_address: client_address.to_string(),
        };

        if let Err(e) = self.access_log_repository.append(entry).await {
            tracing::warn!(short_code, error = %e, "failed to record access");
            metrics::counter!("access_log_failures_total").increment(1);
        }
    }
}
