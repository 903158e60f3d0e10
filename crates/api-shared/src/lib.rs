//! # API Shared
//!
//! Shared utilities and definitions for LRA APIs.
//!
//! Contains:
//! - Request/response wire types (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by the workspace server binary and `api-rest` for common
//! functionality. Library crates build these wire types; only the API
//! crates serialize them onto a transport.

pub mod health;
pub mod wire;

pub use health::HealthService;
