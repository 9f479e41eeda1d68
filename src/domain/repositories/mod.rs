//! Repository trait definitions for the domain layer.
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - Short code mappings
//! - [`AccessLogRepository`] - Append-only access log

pub mod access_log_repository;
pub mod mapping_repository;

pub use access_log_repository::AccessLogRepository;
pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use access_log_repository::MockAccessLogRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
