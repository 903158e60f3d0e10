//! Observation records from `OBX` segments.
//!
//! An `OBX` line yields at most one record: the line is silently skipped
//! when it lacks a resolvable test name or a value. Reference range and
//! abnormal flag travel verbatim; the matching engine interprets them later.

use lra_types::{FlagSeverity, ObservationValue};

use crate::none_if_empty;
use crate::segment::Segment;

/// One discrete observation result.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationRecord {
    /// Test name from OBX field 3: component 1 preferred, component 0 as
    /// fallback, with literal `:` characters stripped.
    pub test_name: String,

    /// The observation value, tagged numeric or text at the boundary.
    pub value: ObservationValue,

    /// Units from the first component of OBX field 6.
    pub units: Option<String>,

    /// Reference range, verbatim free text; multiple syntaxes are legal and
    /// resolved by the classification engine, not here.
    pub reference_range: Option<String>,

    /// Abnormal flag code, verbatim.
    pub abnormal_flag: Option<String>,

    /// Coarse severity derived from the flag alone.
    pub flag_severity: FlagSeverity,
}

impl ObservationRecord {
    /// Build an observation record from an `OBX` segment.
    ///
    /// Returns `None` when the segment has no test name or no value; that is
    /// a skip, not an error.
    pub fn from_obx(segment: &Segment) -> Option<Self> {
        let identifier = segment.field(3);
        let mut components = identifier.split('^');
        let code = components.next().unwrap_or("");
        let label = components.next().unwrap_or("");
        let test_name = if label.is_empty() { code } else { label }.replace(':', "");

        let raw_value = segment.field(5);
        if test_name.is_empty() || raw_value.is_empty() {
            return None;
        }

        let flag = segment.field(8);
        Some(ObservationRecord {
            test_name,
            value: ObservationValue::parse(raw_value),
            units: none_if_empty(segment.component(6, 0)),
            reference_range: none_if_empty(segment.field(7)),
            abnormal_flag: none_if_empty(flag),
            flag_severity: FlagSeverity::from_flag(flag),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obx(line: &str) -> Option<ObservationRecord> {
        ObservationRecord::from_obx(&Segment::parse(line))
    }

    #[test]
    fn builds_a_full_record() {
        let record = obx("OBX|1|NM|GLU^Glucose||8.5|mmol/L^|3.5-5.5|H|||F").expect("record");

        assert_eq!(record.test_name, "Glucose");
        assert_eq!(record.value, ObservationValue::Numeric(8.5));
        assert_eq!(record.units.as_deref(), Some("mmol/L"));
        assert_eq!(record.reference_range.as_deref(), Some("3.5-5.5"));
        assert_eq!(record.abnormal_flag.as_deref(), Some("H"));
        assert_eq!(record.flag_severity, FlagSeverity::High);
    }

    #[test]
    fn prefers_label_component_and_falls_back_to_code() {
        let record = obx("OBX|1|NM|GLU^Glucose||1|||").expect("record");
        assert_eq!(record.test_name, "Glucose");

        let record = obx("OBX|1|NM|GLU||1|||").expect("record");
        assert_eq!(record.test_name, "GLU");
    }

    #[test]
    fn strips_colons_from_test_names() {
        let record = obx("OBX|1|NM|CHOL^Cholesterol:||6.2|||").expect("record");
        assert_eq!(record.test_name, "Cholesterol");
    }

    #[test]
    fn skips_lines_without_name_or_value() {
        assert!(obx("OBX|1|NM|||8.5|||").is_none());
        assert!(obx("OBX|1|NM|GLU^Glucose|||||").is_none());
    }

    #[test]
    fn text_values_are_kept_verbatim() {
        let record = obx("OBX|2|ST|CULT^Culture||No growth|||").expect("record");
        assert_eq!(
            record.value,
            ObservationValue::Text("No growth".to_string())
        );
        assert_eq!(record.flag_severity, FlagSeverity::Normal);
    }

    #[test]
    fn critical_flags_grade_immediately() {
        let record = obx("OBX|1|NM|K^Potassium||7.1|mmol/L|3.5-5.2|HH|||F").expect("record");
        assert_eq!(record.flag_severity, FlagSeverity::Critical);
    }
}
