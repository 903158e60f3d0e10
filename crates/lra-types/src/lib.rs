//! # LRA Types
//!
//! Shared domain primitives for the LRA lab result analyser.
//!
//! This crate holds the vocabulary types that every other crate speaks:
//! severity grades, risk levels, the numeric-or-text observation value, and
//! the name normalization used for fuzzy matching against the knowledge base.
//! It deliberately has no I/O and no dependencies beyond serialisation.

pub mod name;
pub mod value;

pub use value::ObservationValue;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Clinical severity of an analysed observation.
///
/// This is the engine's verdict after flag and reference-range evaluation,
/// not the coarse per-flag grade (see [`FlagSeverity`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Within the reference interval, or nothing usable to judge against.
    Normal,
    /// Outside the reference interval or flagged abnormal.
    Abnormal,
    /// Far outside the reference interval or flagged critical.
    Critical,
}

impl Severity {
    /// Wire-format string for this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Abnormal => "abnormal",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse severity derived from an observation's abnormal flag alone.
///
/// Assigned by the message parser before any reference-range evaluation
/// takes place. Flag comparison is case-insensitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlagSeverity {
    Normal,
    Low,
    High,
    Critical,
}

impl FlagSeverity {
    /// Derive the coarse severity from an abnormal flag code.
    ///
    /// `H` maps to high, `L` to low, the critical pairs (`HH`, `CH`, `LL`,
    /// `CL`) to critical, and anything else (including an empty flag) to
    /// normal.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim().to_ascii_uppercase().as_str() {
            "H" => FlagSeverity::High,
            "L" => FlagSeverity::Low,
            "HH" | "CH" | "LL" | "CL" => FlagSeverity::Critical,
            _ => FlagSeverity::Normal,
        }
    }
}

/// Risk level attached to a small allow-list of well-known tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Wire-format string for this risk level.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
