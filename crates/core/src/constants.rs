//! Constants used throughout the LRA core crate.
//!
//! Clinical thresholds and defaults live here so the classification and
//! interpretation rules read as one table.

/// Default directory for the knowledge-base CSV tables when no explicit
/// directory is configured.
pub const DEFAULT_KNOWLEDGE_DIR: &str = "knowledge_data";

/// Deviation above which a value outside a `min-max` range grades critical.
pub const RANGE_CRITICAL_DEVIATION: f64 = 0.3;

/// Deviation above which a value over an upper-bound range (`<`, `<=`)
/// grades critical.
pub const UPPER_BOUND_CRITICAL_DEVIATION: f64 = 0.5;

/// Deviation above which a value under a lower-bound range (`>`, `>=`)
/// grades critical.
pub const LOWER_BOUND_CRITICAL_DEVIATION: f64 = 0.3;

/// Total cholesterol above this adds the cardiovascular-risk note (mmol/L).
pub const CHOLESTEROL_HIGH_MMOL_L: f64 = 5.5;

/// Fasting glucose above this adds the diabetes note (mmol/L).
pub const GLUCOSE_FASTING_HIGH_MMOL_L: f64 = 7.0;

/// Haemoglobin below this adds the anemia note for gender code `F` (g/L).
pub const HAEMOGLOBIN_LOW_FEMALE_G_L: f64 = 120.0;

/// Haemoglobin below this adds the anemia note for gender code `M` (g/L).
pub const HAEMOGLOBIN_LOW_MALE_G_L: f64 = 130.0;
