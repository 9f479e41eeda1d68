//! HTTP API layer.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
