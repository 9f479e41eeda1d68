//! Utility functions for code generation, input validation and request handling.
//!
//! - [`code_generator`] - Deterministic short code generation
//! - [`url_validator`] - Scheme check for URLs submitted for shortening
//! - [`ttl`] - TTL parsing and expiry computation
//! - [`timestamp`] - Canonical instant encoding used by the store
//! - [`client_addr`] - Client address extraction for access logging

pub mod client_addr;
pub mod code_generator;
pub mod timestamp;
pub mod ttl;
pub mod url_validator;
