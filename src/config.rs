//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://url_shortener.db"
//! export BASE_URL="https://short.ly/"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://url_shortener.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `BASE_URL` - Prefix for rendered short URLs (default: `https://short.ly/`)
//! - `SHORT_HOST` - Host prefix stripped from redirect paths (default: host of `BASE_URL`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_TTL_HOURS` - TTL for links created without one (default: 24)
//! - `BEHIND_PROXY` - Read client address from forwarding headers (default: false)
//! - `DB_MAX_CONNECTIONS`, `DB_CONNECT_TIMEOUT`, `DB_BUSY_TIMEOUT` - Pool tuning

use anyhow::{Context, Result};
use chrono::Duration;
use std::env;
use url::Url;

use crate::infrastructure::persistence::PoolSettings;
use crate::utils::ttl;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub base_url: String,
    /// Host segment that may prefix a short code in redirect paths
    /// (`/short.ly/abcd1234`). `None` disables stripping.
    pub short_host: Option<String>,
    pub log_level: String,
    pub log_format: String,
    pub default_ttl_hours: f64,
    /// When true, the access log records the client from X-Forwarded-For / X-Real-IP.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
    /// Time a connection waits on a locked database in seconds
    /// (`DB_BUSY_TIMEOUT`, default: 5).
    pub db_busy_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://url_shortener.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "https://short.ly/".to_string());
        let short_host = env::var("SHORT_HOST")
            .ok()
            .or_else(|| host_of(&base_url))
            .filter(|h| !h.is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_ttl_hours = match env::var("DEFAULT_TTL_HOURS") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("DEFAULT_TTL_HOURS must be a number, got '{}'", v))?,
            Err(_) => ttl::DEFAULT_TTL_HOURS as f64,
        };

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_connect_timeout = env::var("DB_CONNECT_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let db_busy_timeout = env::var("DB_BUSY_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            short_host,
            log_level,
            log_format,
            default_ttl_hours,
            behind_proxy,
            db_max_connections,
            db_connect_timeout,
            db_busy_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `database_url` is not a SQLite URL
    /// - `base_url` is not an absolute HTTP(S) URL
    /// - `default_ttl_hours` is not a positive number
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        let base = Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("BASE_URL must use http or https, got '{}'", self.base_url);
        }

        ttl::ttl_from_hours(self.default_ttl_hours).map_err(|e| {
            anyhow::anyhow!(
                "DEFAULT_TTL_HOURS is invalid ({}): {}",
                self.default_ttl_hours,
                e
            )
        })?;

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Default TTL as a duration. Call after [`Self::validate`].
    pub fn default_ttl(&self) -> Duration {
        ttl::ttl_from_hours(self.default_ttl_hours).unwrap_or_else(|_| ttl::default_ttl())
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: std::time::Duration::from_secs(self.db_connect_timeout),
            busy_timeout: std::time::Duration::from_secs(self.db_busy_timeout),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Base URL: {}", self.base_url);
        match &self.short_host {
            Some(host) => tracing::info!("  Short host prefix: {}", host),
            None => tracing::info!("  Short host prefix: disabled"),
        }
        tracing::info!("  Default TTL: {}h", self.default_ttl_hours);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn host_of(base_url: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite://test.db".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            base_url: "https://short.ly/".to_string(),
            short_host: Some("short.ly".to_string()),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            default_ttl_hours: 24.0,
            behind_proxy: false,
            db_max_connections: 10,
            db_connect_timeout: 30,
            db_busy_timeout: 5,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.database_url = "postgres://localhost/test".to_string();
        assert!(config.validate().is_err());

        config.database_url = "sqlite::memory:".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_ttl() {
        let mut config = test_config();

        config.default_ttl_hours = 0.0;
        assert!(config.validate().is_err());

        config.default_ttl_hours = -3.0;
        assert!(config.validate().is_err());

        config.default_ttl_hours = 0.5;
        assert!(config.validate().is_ok());
        assert_eq!(config.default_ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = test_config();

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "ftp://short.ly/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pool_settings() {
        let settings = test_config().pool_settings();

        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.acquire_timeout, std::time::Duration::from_secs(30));
        assert_eq!(settings.busy_timeout, std::time::Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_short_host_derived_from_base_url() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("SHORT_HOST");
            env::set_var("BASE_URL", "https://s.example.com/");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.short_host.as_deref(), Some("s.example.com"));

        unsafe {
            env::remove_var("BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_short_host_override() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BASE_URL", "https://s.example.com/");
            env::set_var("SHORT_HOST", "go.example");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.short_host.as_deref(), Some("go.example"));

        unsafe {
            env::remove_var("BASE_URL");
            env::remove_var("SHORT_HOST");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("DATABASE_URL");
            env::remove_var("DEFAULT_TTL_HOURS");
            env::remove_var("BEHIND_PROXY");
            env::remove_var("BASE_URL");
            env::remove_var("SHORT_HOST");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url, "sqlite://url_shortener.db");
        assert_eq!(config.default_ttl_hours, 24.0);
        assert!(!config.behind_proxy);
        assert_eq!(config.short_host.as_deref(), Some("short.ly"));
    }

    #[test]
    #[serial]
    fn test_invalid_default_ttl_is_error() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DEFAULT_TTL_HOURS", "soon");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("DEFAULT_TTL_HOURS");
        }
    }
}
