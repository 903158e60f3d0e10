//! In-memory schema of the four reference tables.
//!
//! Every cross-reference between tables is a name string; there are no
//! stable identifiers in the source files. The matching engine therefore
//! joins tables with normalized fuzzy comparison, and table order matters:
//! lookups are first-match-wins linear scans.

/// A canonical named test definition, with aliases and expected units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticMetric {
    pub name: String,
    /// Upstream lab code aliases that may appear as OBX test identifiers.
    pub oru_sonic_codes: Vec<String>,
    pub diagnostic_groups: Vec<String>,
    pub units: String,
    pub age_ranges: Vec<String>,
    pub gender: String,
    pub reference_ranges: Vec<String>,
}

/// A clinical condition linked to metrics, groups, and diagnostics by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Condition {
    pub name: String,
    pub diagnostic_metrics: Vec<String>,
    pub diagnostic_groups: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// A grouping of metrics and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticGroup {
    pub name: String,
    pub diagnostic_metrics: Vec<String>,
    pub diagnostics: Vec<String>,
}

/// A named diagnostic linked to its metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub name: String,
    pub diagnostic_metrics: Vec<String>,
}
