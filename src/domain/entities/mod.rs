//! Core domain entities.
//!
//! - [`UrlMapping`] - A short code bound to its original URL
//! - [`AccessLogEntry`] - A logged access of a short code
//!
//! Creation inputs are separate structs (`NewUrlMapping`, `NewAccessLogEntry`)
//! since surrogate ids are assigned by the store.

pub mod access_log;
pub mod url_mapping;

pub use access_log::{AccessLogEntry, NewAccessLogEntry};
pub use url_mapping::{NewUrlMapping, UrlMapping};
