//! # LRA Core
//!
//! Core analysis logic for the LRA lab result analyser.
//!
//! This crate contains pure computation over fully materialized inputs:
//! - fuzzy metric resolution and relationship expansion against the
//!   knowledge-base tables
//! - reference-range parsing and severity/risk derivation
//! - interpretation generation and response aggregation
//!
//! **No API concerns**: HTTP servers and transport serialization belong in
//! `api-rest` and the workspace binary. **No I/O**: message text arrives
//! parsed from the `hl7` crate and knowledge tables arrive loaded from the
//! `knowledge` crate.

pub mod analyzer;
pub mod config;
pub mod constants;
pub mod response;

pub use analyzer::{analyze, determine_severity, find_matching_metric, parse_reference_range};
pub use analyzer::{PatientContext, ReferenceRange};
pub use config::CoreConfig;
pub use constants::DEFAULT_KNOWLEDGE_DIR;
pub use response::{patient_wire, prepare_analysis_response};

// The API surfaces consume the shared wire types through this crate.
pub use api_shared::wire;

/// Errors returned by core configuration.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Type alias for Results that can fail with a [`CoreError`].
pub type CoreResult<T> = std::result::Result<T, CoreError>;
