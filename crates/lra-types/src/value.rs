//! Numeric-or-text observation values.
//!
//! Observation values arrive as free text and may or may not be numeric.
//! The parser tags the value once at the boundary; downstream code asks for
//! the numeric form when it needs a comparison and gets the display string
//! only at the response boundary, so precision never round-trips through
//! repeated string conversions.

use serde::{Deserialize, Serialize};

/// An observation value, tagged as numeric or free text at parse time.
#[derive(Clone, Debug, PartialEq)]
pub enum ObservationValue {
    /// The raw text parsed as a locale-free decimal.
    Numeric(f64),
    /// The original text, kept verbatim when it is not numeric.
    Text(String),
}

impl ObservationValue {
    /// Tag a raw value string.
    ///
    /// Leading/trailing whitespace is tolerated around a numeric value; a
    /// non-finite or unparseable value stays text, verbatim.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => ObservationValue::Numeric(n),
            _ => ObservationValue::Text(raw.to_string()),
        }
    }

    /// The numeric form, when this value is numeric.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            ObservationValue::Numeric(n) => Some(*n),
            ObservationValue::Text(_) => None,
        }
    }

    /// Whether the value carried a usable number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ObservationValue::Numeric(_))
    }
}

impl std::fmt::Display for ObservationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationValue::Numeric(n) => write!(f, "{n}"),
            ObservationValue::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for ObservationValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObservationValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ObservationValue::parse(&raw))
    }
}
