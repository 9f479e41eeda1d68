//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening and mapping lookup
//! - [`services::resolution_service::ResolutionService`] - Expiry policy and access logging
//! - [`services::analytics_service::AnalyticsService`] - Access counts and log entries

pub mod services;
