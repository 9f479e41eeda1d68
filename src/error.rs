//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure the core can report is a variant of [`AppError`]. All of them
//! are terminal for the operation that produced them; nothing is retried
//! internally.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed URL, rejected before any store interaction.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Non-positive or unrepresentable time-to-live.
    #[error("{message}")]
    InvalidTtl { message: String, details: Value },

    /// The short code is already occupied by a different URL.
    #[error("{message}")]
    Collision { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The mapping exists but is past its expiry time.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// Transient store failure (connection loss, lock timeout). Opaque to callers.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    /// Malformed request body at the HTTP boundary.
    #[error("{message}")]
    Validation { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_ttl(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidTtl {
            message: message.into(),
            details,
        }
    }
    pub fn collision(message: impl Into<String>, details: Value) -> Self {
        Self::Collision {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidTtl { .. } => "invalid_ttl",
            AppError::Collision { .. } => "collision",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::StoreUnavailable { .. } => "store_unavailable",
            AppError::Validation { .. } => "validation_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidTtl { .. }
            | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Collision { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn into_parts(self) -> (String, Value) {
        match self {
            AppError::InvalidUrl { message, details }
            | AppError::InvalidTtl { message, details }
            | AppError::Collision { message, details }
            | AppError::NotFound { message, details }
            | AppError::Expired { message, details }
            | AppError::StoreUnavailable { message, details }
            | AppError::Validation { message, details } => (message, details),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = self.into_parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "store operation failed");
        AppError::store_unavailable("Store unavailable", json!({}))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);

        if errors.errors().contains_key("url") {
            AppError::invalid_url("Invalid URL", details)
        } else if errors.errors().contains_key("expiry_hours") {
            AppError::invalid_ttl("TTL must be a positive number of hours", details)
        } else {
            AppError::validation("Invalid request", details)
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_url("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::invalid_ttl("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::collision("x", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::expired("x", json!({})).status(), StatusCode::GONE);
        assert_eq!(
            AppError::store_unavailable("x", json!({})).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_collision_is_distinct_from_validation() {
        let collision = AppError::collision("taken", json!({}));
        let invalid = AppError::invalid_url("bad", json!({}));

        assert_ne!(collision.code(), invalid.code());
        assert_ne!(collision.status(), invalid.status());
    }

    #[test]
    fn test_error_parts_carry_message_and_details() {
        let err = AppError::expired("Short link has expired", json!({ "code": "abcd1234" }));
        assert_eq!(err.code(), "expired");
        assert_eq!(err.to_string(), "Short link has expired");

        let (message, details) = err.into_parts();
        assert_eq!(message, "Short link has expired");
        assert_eq!(details["code"], "abcd1234");
    }

    #[test]
    fn test_sqlx_error_is_opaque() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();

        assert!(matches!(err, AppError::StoreUnavailable { .. }));
        assert_eq!(err.into_parts().1, json!({}));
    }
}
