//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::domain::entities::UrlMapping;
use crate::utils::url_validator::is_valid_url;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL; must be a string starting with `http://` or
    /// `https://`. Kept as raw JSON so a value of the wrong type is reported
    /// as an invalid URL rather than a malformed body.
    #[validate(
        required(message = "URL is required"),
        custom(function = "validate_http_url")
    )]
    pub url: Option<Value>,

    /// Lifetime of the link in hours. Fractions are allowed.
    #[serde(alias = "ttl_hours")]
    #[validate(range(exclusive_min = 0.0, message = "TTL must be a positive number of hours"))]
    pub expiry_hours: Option<f64>,
}

impl ShortenRequest {
    /// The URL as a string, if one of that type was supplied.
    pub fn url_str(&self) -> Option<&str> {
        self.url.as_ref().and_then(Value::as_str)
    }
}

fn validate_http_url(url: &Value) -> Result<(), ValidationError> {
    if url.as_str().is_some_and(is_valid_url) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_url");
        err.message = Some(Cow::Borrowed(
            "URL must be a string starting with http:// or https://",
        ));
        Err(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn from_mapping(mapping: UrlMapping, short_url: String) -> Self {
        Self {
            short_code: mapping.short_code,
            short_url,
            original_url: mapping.original_url,
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
        }
    }
}
