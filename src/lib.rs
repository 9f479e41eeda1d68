//! # linkshort
//!
//! A deterministic URL shortener built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Mappings, access log entries and repository traits
//! - **Application Layer** ([`application`]) - Shortening, resolution and analytics services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations and repositories
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Behavior
//!
//! - A short code is the first 8 hex characters of the URL's SHA-256 digest,
//!   so shortening the same URL twice yields the same code and mapping
//! - Every mapping expires; the default lifetime is 24 hours
//! - Each successful redirect appends an entry to the access log, which
//!   backs the per-code analytics
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://url_shortener.db"
//! cargo run
//! ```
//!
//! Migrations are applied on startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        Analytics, AnalyticsService, LinkService, Resolution, ResolutionService,
    };
    pub use crate::domain::entities::{AccessLogEntry, NewAccessLogEntry, NewUrlMapping, UrlMapping};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
