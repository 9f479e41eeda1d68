//! Time-to-live handling for new mappings.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::error::AppError;
use crate::utils::timestamp;

/// TTL applied when the caller does not supply one.
pub const DEFAULT_TTL_HOURS: i64 = 24;

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

pub fn default_ttl() -> Duration {
    Duration::hours(DEFAULT_TTL_HOURS)
}

/// Converts a (possibly fractional) number of hours into a TTL.
///
/// # Errors
///
/// Returns [`AppError::InvalidTtl`] for NaN, infinite, zero or negative
/// values, and for values that round down to zero nanoseconds or exceed the
/// representable range.
pub fn ttl_from_hours(hours: f64) -> Result<Duration, AppError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::invalid_ttl(
            "TTL must be a positive number of hours",
            json!({ "ttl_hours": hours.to_string() }),
        ));
    }

    let nanos = (hours * NANOS_PER_HOUR).floor();
    if nanos < 1.0 || nanos >= i64::MAX as f64 {
        return Err(AppError::invalid_ttl(
            "TTL is out of range",
            json!({ "ttl_hours": hours }),
        ));
    }

    Ok(Duration::nanoseconds(nanos as i64))
}

/// Computes `created_at + ttl`, rejecting non-positive TTLs and creation or
/// expiry instants the store cannot represent.
///
/// # Errors
///
/// Returns [`AppError::InvalidTtl`].
pub fn expires_at(created_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AppError> {
    if ttl <= Duration::zero() {
        return Err(AppError::invalid_ttl(
            "TTL must be positive",
            json!({ "ttl_seconds": ttl.num_seconds() }),
        ));
    }

    if timestamp::to_nanos(created_at).is_none() {
        return Err(AppError::invalid_ttl(
            "Creation time is out of range",
            json!({ "created_at": created_at.to_rfc3339() }),
        ));
    }

    created_at
        .checked_add_signed(ttl)
        .filter(|expiry| timestamp::to_nanos(*expiry).is_some())
        .ok_or_else(|| {
            AppError::invalid_ttl(
                "TTL is out of range",
                json!({ "ttl_seconds": ttl.num_seconds() }),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_ttl_from_whole_hours() {
        assert_eq!(ttl_from_hours(24.0).unwrap(), Duration::hours(24));
        assert_eq!(ttl_from_hours(1.0).unwrap(), Duration::hours(1));
    }

    #[test]
    fn test_ttl_from_fractional_hours() {
        assert_eq!(ttl_from_hours(1.5).unwrap(), Duration::minutes(90));
    }

    #[test]
    fn test_ttl_rejects_non_positive() {
        assert!(matches!(
            ttl_from_hours(0.0),
            Err(AppError::InvalidTtl { .. })
        ));
        assert!(matches!(
            ttl_from_hours(-1.0),
            Err(AppError::InvalidTtl { .. })
        ));
    }

    #[test]
    fn test_ttl_rejects_non_finite() {
        assert!(ttl_from_hours(f64::NAN).is_err());
        assert!(ttl_from_hours(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ttl_rejects_out_of_range() {
        assert!(ttl_from_hours(1e12).is_err());
    }

    #[test]
    fn test_expires_at_adds_ttl() {
        assert_eq!(
            expires_at(t0(), Duration::hours(1)).unwrap(),
            t0() + Duration::hours(1)
        );
    }

    #[test]
    fn test_expires_at_rejects_zero_and_negative() {
        assert!(matches!(
            expires_at(t0(), Duration::zero()),
            Err(AppError::InvalidTtl { .. })
        ));
        assert!(matches!(
            expires_at(t0(), Duration::hours(-1)),
            Err(AppError::InvalidTtl { .. })
        ));
    }

    #[test]
    fn test_expires_at_rejects_unrepresentable_instant() {
        assert!(matches!(
            expires_at(t0(), Duration::days(365 * 300)),
            Err(AppError::InvalidTtl { .. })
        ));
    }

    #[test]
    fn test_expires_at_rejects_unrepresentable_creation_time() {
        let created_at = timestamp::from_nanos(i64::MIN) - Duration::seconds(1);
        assert!(timestamp::to_nanos(created_at + Duration::hours(1)).is_some());

        assert!(matches!(
            expires_at(created_at, Duration::hours(1)),
            Err(AppError::InvalidTtl { .. })
        ));
    }
}
