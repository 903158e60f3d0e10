//! Reference knowledge base for LRA.
//!
//! Four read-only tables cross-reference each other by free-text name:
//! diagnostic metrics, conditions, diagnostic groups, and diagnostics. This
//! crate owns the in-memory schema and the flat-file (CSV) loader; all
//! matching against the tables lives in the core analysis crate.
//!
//! Loading is lenient: a missing or unreadable file degrades to an empty
//! table with a warning, so one bad reference file never takes the whole
//! analysis down.

pub mod csv;
pub mod loader;
pub mod tables;

pub use loader::KnowledgeBase;
pub use tables::{Condition, Diagnostic, DiagnosticGroup, DiagnosticMetric};

/// Filename of the diagnostic metrics table inside a knowledge directory.
pub const METRICS_FILENAME: &str = "diagnostic_metrics.csv";

/// Filename of the conditions table.
pub const CONDITIONS_FILENAME: &str = "conditions.csv";

/// Filename of the diagnostic groups table.
pub const GROUPS_FILENAME: &str = "diagnostic_groups.csv";

/// Filename of the diagnostics table.
pub const DIAGNOSTICS_FILENAME: &str = "diagnostics.csv";

/// Errors returned by the strict per-file loaders.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("failed to read knowledge file: {0}")]
    FileRead(std::io::Error),
}

/// Type alias for Results that can fail with a [`KnowledgeError`].
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
