//! Business logic services for the application layer.

pub mod analytics_service;
pub mod link_service;
pub mod resolution_service;

pub use analytics_service::{Analytics, AnalyticsService};
pub use link_service::LinkService;
pub use resolution_service::{Resolution, ResolutionService};
