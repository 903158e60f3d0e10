//! HL7 v2 message boundary for LRA.
//!
//! This crate decodes the pipe/caret-delimited segment format of an ORU
//! result message into flat domain records:
//! - patient demographics from the `PID` segment
//! - one [`ObservationRecord`] per well-formed `OBX` segment
//!
//! This crate focuses on:
//! - segment/field/component tokenization
//! - field mapping and light reformatting (names, birth dates, addresses)
//! - tagging observation values as numeric or text at the boundary
//!
//! It performs no classification: reference ranges and abnormal flags are
//! carried verbatim for the matching engine, apart from the coarse per-flag
//! severity grade the parser derives up front.
//!
//! Callers must normalize line endings to `\n` before parsing (see
//! [`normalize_line_endings`]); the tokenizer only ever splits on `\n`.

pub mod message;
pub mod observation;
pub mod patient;
pub mod segment;

// Re-export the flat domain types and the parse entry point.
pub use message::{normalize_line_endings, parse, ParsedMessage};
pub use observation::ObservationRecord;
pub use patient::Patient;
pub use segment::Segment;

/// Errors returned by the `hl7` boundary crate.
///
/// A missing `PID` segment is the only fatal condition; malformed or absent
/// individual fields degrade to empty strings or skipped records instead.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no PID segment found in message")]
    MissingPatientSegment,
}

/// Type alias for Results that can fail with a [`ParseError`].
pub type Hl7Result<T> = Result<T, ParseError>;

/// Empty fields become `None` so downstream option handling stays uniform.
pub(crate) fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
