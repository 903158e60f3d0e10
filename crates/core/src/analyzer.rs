//! Matching and classification engine.
//!
//! Pure functions over immutable inputs: each observation record is analysed
//! independently against the knowledge-base tables, so a batch may be
//! processed in any order (or in parallel) with identical output.
//!
//! Matching is name-based and fuzzy throughout: the tables cross-reference
//! each other by free-text name, so every join goes through
//! [`lra_types::name`]. Lookups are first-match-wins linear scans in table
//! order; the tie-break is table position, never "best" match.

use api_shared::wire::AnalyzedResult;
use hl7::ObservationRecord;
use knowledge::{DiagnosticMetric, KnowledgeBase};
use lra_types::name::{normalize, overlaps};
use lra_types::{ObservationValue, RiskLevel, Severity};

use crate::constants::{
    CHOLESTEROL_HIGH_MMOL_L, GLUCOSE_FASTING_HIGH_MMOL_L, HAEMOGLOBIN_LOW_FEMALE_G_L,
    HAEMOGLOBIN_LOW_MALE_G_L, LOWER_BOUND_CRITICAL_DEVIATION, RANGE_CRITICAL_DEVIATION,
    UPPER_BOUND_CRITICAL_DEVIATION,
};

/// Patient-level context consulted by the interpretation rules.
#[derive(Clone, Debug, Default)]
pub struct PatientContext {
    /// Age in whole years, when a birth year was available.
    pub age: Option<i32>,
    /// Gender code as carried in the message (`F`, `M`, ...).
    pub gender: Option<String>,
}

/// A reference range classified into one numeric shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReferenceRange {
    /// `min-max` interval.
    Range { min: f64, max: f64 },
    /// `< max`, upper bound exclusive.
    LessThan { max: f64 },
    /// `<= max`, upper bound inclusive.
    LessThanEqual { max: f64 },
    /// `> min`, lower bound exclusive.
    GreaterThan { min: f64 },
    /// `>= min`, lower bound inclusive.
    GreaterThanEqual { min: f64 },
    /// No numeric range available.
    Unknown,
}

/// Classify a free-text reference range into one shape.
///
/// Operator prefixes take precedence over the dash form; `<=`/`>=` must be
/// tested before their bare `<`/`>` prefixes so the one-character operator
/// does not swallow them. Anything that fails numeric parsing collapses to
/// [`ReferenceRange::Unknown`].
pub fn parse_reference_range(raw: &str) -> ReferenceRange {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.strip_prefix("<=") {
        if let Ok(max) = rest.trim().parse::<f64>() {
            return ReferenceRange::LessThanEqual { max };
        }
    }
    if let Some(rest) = trimmed.strip_prefix('<') {
        if let Ok(max) = rest.trim().parse::<f64>() {
            return ReferenceRange::LessThan { max };
        }
    }
    if let Some(rest) = trimmed.strip_prefix(">=") {
        if let Ok(min) = rest.trim().parse::<f64>() {
            return ReferenceRange::GreaterThanEqual { min };
        }
    }
    if let Some(rest) = trimmed.strip_prefix('>') {
        if let Ok(min) = rest.trim().parse::<f64>() {
            return ReferenceRange::GreaterThan { min };
        }
    }
    if let Some((low, high)) = trimmed.split_once('-') {
        if let (Ok(min), Ok(max)) = (low.trim().parse::<f64>(), high.trim().parse::<f64>()) {
            return ReferenceRange::Range { min, max };
        }
    }

    ReferenceRange::Unknown
}

/// Resolve an observation's test name to a knowledge-base metric.
///
/// Two passes over table order, first match wins:
/// 1. normalized-name equality, additionally gated on exact units equality
///    when the caller supplied a units hint;
/// 2. ORU code aliases (normalize-equal or substring in either direction),
///    then metric-name/test-name substring overlap in either direction.
///
/// No match is not an error; analysis proceeds with empty related-entity
/// sets.
pub fn find_matching_metric<'a>(
    test_name: &str,
    units: Option<&str>,
    metrics: &'a [DiagnosticMetric],
) -> Option<&'a DiagnosticMetric> {
    if test_name.is_empty() {
        return None;
    }
    let test_norm = normalize(test_name);

    let direct = metrics.iter().find(|metric| {
        if metric.name.is_empty() {
            return false;
        }
        let name_match = normalize(&metric.name) == test_norm;
        match units {
            Some(units) => name_match && metric.units == units,
            None => name_match,
        }
    });
    if direct.is_some() {
        return direct;
    }

    metrics.iter().find(|metric| {
        if metric.name.is_empty() {
            return false;
        }
        let code_match = metric.oru_sonic_codes.iter().any(|code| {
            let code_norm = normalize(code);
            !code_norm.is_empty() && overlaps(&code_norm, &test_norm)
        });
        code_match || overlaps(&normalize(&metric.name), &test_norm)
    })
}

/// Whether any entry of a declared metric-name list refers to the resolved
/// metric or the raw test name.
///
/// List entries compare normalize-equal against the metric name, and
/// normalize-equal or substring (either direction) against the test name.
fn metric_list_matches(list: &[String], metric_norm: &str, test_norm: &str) -> bool {
    list.iter().any(|entry| {
        let entry_norm = normalize(entry);
        entry_norm == metric_norm
            || entry_norm == test_norm
            || entry_norm.contains(test_norm)
            || test_norm.contains(entry_norm.as_str())
    })
}

/// Related-entity names collected for one resolved metric.
#[derive(Clone, Debug, Default, PartialEq)]
struct RelatedEntities {
    conditions: Vec<String>,
    groups: Vec<String>,
    diagnostics: Vec<String>,
}

/// Expand a resolved metric into related conditions, groups and diagnostics.
///
/// Diagnostic groups are additionally expanded one transitive hop through
/// matched conditions: a group declared on a matched condition joins the
/// result set (deduplicated by exact name) even when it does not list the
/// metric directly. Conditions and diagnostics get no such hop.
fn expand_relationships(
    metric: &DiagnosticMetric,
    test_norm: &str,
    kb: &KnowledgeBase,
) -> RelatedEntities {
    let metric_norm = normalize(&metric.name);

    let conditions: Vec<String> = kb
        .conditions
        .iter()
        .filter(|c| metric_list_matches(&c.diagnostic_metrics, &metric_norm, test_norm))
        .map(|c| c.name.clone())
        .collect();

    let mut groups: Vec<String> = kb
        .groups
        .iter()
        .filter(|g| metric_list_matches(&g.diagnostic_metrics, &metric_norm, test_norm))
        .map(|g| g.name.clone())
        .collect();

    // One hop: groups declared on matched conditions.
    let condition_groups: Vec<&String> = conditions
        .iter()
        .filter_map(|name| kb.conditions.iter().find(|c| &c.name == name))
        .flat_map(|c| c.diagnostic_groups.iter())
        .collect();
    if !condition_groups.is_empty() {
        let hop: Vec<String> = kb
            .groups
            .iter()
            .filter(|g| {
                condition_groups
                    .iter()
                    .any(|declared| normalize(&g.name) == normalize(declared.as_str()))
            })
            .map(|g| g.name.clone())
            .collect();

        let mut merged = Vec::new();
        for name in groups.into_iter().chain(hop) {
            if !merged.contains(&name) {
                merged.push(name);
            }
        }
        groups = merged;
    }

    let diagnostics: Vec<String> = kb
        .diagnostics
        .iter()
        .filter(|d| metric_list_matches(&d.diagnostic_metrics, &metric_norm, test_norm))
        .map(|d| d.name.clone())
        .collect();

    RelatedEntities {
        conditions,
        groups,
        diagnostics,
    }
}

/// Determine the clinical severity of one observation.
///
/// Flag first: a recognised critical or abnormal flag decides immediately;
/// an unrecognised flag falls through to range evaluation rather than
/// short-circuiting to normal. Range second: the value must be numeric
/// (text values classify normal), and the deviation relative to the violated
/// boundary separates abnormal from critical.
pub fn determine_severity(
    value: &ObservationValue,
    reference_range: Option<&str>,
    abnormal_flag: Option<&str>,
) -> Severity {
    if let Some(flag) = abnormal_flag {
        match flag.to_uppercase().as_str() {
            "C" | "HH" | "LL" | "CC" | "CL" | "CH" => return Severity::Critical,
            "H" | "L" | "A" | "AA" | "W" => return Severity::Abnormal,
            _ => {}
        }
    }

    let Some(range_text) = reference_range else {
        return Severity::Normal;
    };
    let Some(value) = value.as_numeric() else {
        return Severity::Normal;
    };

    match parse_reference_range(range_text) {
        ReferenceRange::Range { min, max } => {
            let width = max - min;
            if value < min {
                grade((min - value) / width, RANGE_CRITICAL_DEVIATION)
            } else if value > max {
                grade((value - max) / width, RANGE_CRITICAL_DEVIATION)
            } else {
                Severity::Normal
            }
        }
        ReferenceRange::LessThan { max } if value >= max => {
            grade(value / max - 1.0, UPPER_BOUND_CRITICAL_DEVIATION)
        }
        ReferenceRange::LessThanEqual { max } if value > max => {
            grade(value / max - 1.0, UPPER_BOUND_CRITICAL_DEVIATION)
        }
        ReferenceRange::GreaterThan { min } if value <= min => {
            grade(1.0 - value / min, LOWER_BOUND_CRITICAL_DEVIATION)
        }
        ReferenceRange::GreaterThanEqual { min } if value < min => {
            grade(1.0 - value / min, LOWER_BOUND_CRITICAL_DEVIATION)
        }
        _ => Severity::Normal,
    }
}

fn grade(deviation: f64, critical_threshold: f64) -> Severity {
    if deviation > critical_threshold {
        Severity::Critical
    } else {
        Severity::Abnormal
    }
}

/// Build the ordered interpretation sentences for one observation.
///
/// Severity contributes the leading sentences; the named-test rules then
/// append their risk notes. Name matching here is raw substring, not
/// normalized.
fn build_interpretations(
    record: &ObservationRecord,
    ctx: &PatientContext,
    severity: Severity,
) -> Vec<String> {
    let mut notes = Vec::new();

    match severity {
        Severity::Critical => {
            notes.push(format!("Critical {} level detected.", record.test_name));
            notes.push("Immediate clinical attention may be required.".to_string());
        }
        Severity::Abnormal => {
            notes.push(format!("Abnormal {} level detected.", record.test_name));
        }
        Severity::Normal => {}
    }

    let Some(value) = record.value.as_numeric() else {
        return notes;
    };
    let gender = ctx.gender.as_deref();

    if record.test_name.contains("Cholesterol") && value > CHOLESTEROL_HIGH_MMOL_L {
        notes.push("Elevated cholesterol increases risk of cardiovascular disease.".to_string());
    }
    if record.test_name.contains("Glucose") && value > GLUCOSE_FASTING_HIGH_MMOL_L {
        notes.push("Elevated fasting glucose may indicate diabetes.".to_string());
    }
    if record.test_name.contains("Haemoglobin")
        && value < HAEMOGLOBIN_LOW_FEMALE_G_L
        && gender == Some("F")
    {
        notes.push("Low hemoglobin may indicate anemia.".to_string());
    }
    if record.test_name.contains("Haemoglobin")
        && value < HAEMOGLOBIN_LOW_MALE_G_L
        && gender == Some("M")
    {
        notes.push("Low hemoglobin may indicate anemia.".to_string());
    }

    notes
}

/// Risk level for the fixed allow-list of well-known tests.
fn risk_level_for(test_name: &str, severity: Severity) -> Option<RiskLevel> {
    const RISK_TESTS: [&str; 4] = ["Cholesterol", "Glucose", "Blood Pressure", "HbA1c"];

    if RISK_TESTS.iter().any(|name| test_name.contains(name)) {
        Some(match severity {
            Severity::Critical => RiskLevel::High,
            Severity::Abnormal => RiskLevel::Moderate,
            Severity::Normal => RiskLevel::Low,
        })
    } else {
        None
    }
}

/// Analyse one observation record against the knowledge base.
///
/// Pure and independent per record: no ordering requirement between
/// records, no shared state.
pub fn analyze(
    record: &ObservationRecord,
    ctx: &PatientContext,
    kb: &KnowledgeBase,
) -> AnalyzedResult {
    let metric = find_matching_metric(&record.test_name, record.units.as_deref(), &kb.metrics);
    let related = match metric {
        Some(metric) => expand_relationships(metric, &normalize(&record.test_name), kb),
        None => {
            tracing::debug!("no metric match for test {:?}", record.test_name);
            RelatedEntities::default()
        }
    };

    let severity = determine_severity(
        &record.value,
        record.reference_range.as_deref(),
        record.abnormal_flag.as_deref(),
    );
    let interpretations = build_interpretations(record, ctx, severity);

    AnalyzedResult {
        test_name: record.test_name.clone(),
        value: record.value.to_string(),
        units: record.units.clone(),
        reference_range: record.reference_range.clone(),
        severity,
        related_conditions: related.conditions,
        related_diagnostic_groups: related.groups,
        related_diagnostics: related.diagnostics,
        interpretations: if interpretations.is_empty() {
            None
        } else {
            Some(interpretations)
        },
        risk_level: risk_level_for(&record.test_name, severity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knowledge::{Condition, Diagnostic, DiagnosticGroup};

    fn metric(name: &str, units: &str, codes: &[&str]) -> DiagnosticMetric {
        DiagnosticMetric {
            name: name.to_string(),
            units: units.to_string(),
            oru_sonic_codes: codes.iter().map(|c| c.to_string()).collect(),
            ..DiagnosticMetric::default()
        }
    }

    fn record(test_name: &str, value: &str, range: Option<&str>, flag: Option<&str>) -> ObservationRecord {
        ObservationRecord {
            test_name: test_name.to_string(),
            value: ObservationValue::parse(value),
            units: None,
            reference_range: range.map(str::to_string),
            abnormal_flag: flag.map(str::to_string),
            flag_severity: lra_types::FlagSeverity::from_flag(flag.unwrap_or("")),
        }
    }

    fn sample_kb() -> KnowledgeBase {
        KnowledgeBase {
            metrics: vec![
                metric("Glucose", "mmol/L", &["GLU", "BGL"]),
                metric("Total Cholesterol", "mmol/L", &["CHOL"]),
                metric("Haemoglobin", "g/L", &["HB", "HGB"]),
            ],
            conditions: vec![
                Condition {
                    name: "Diabetes".to_string(),
                    diagnostic_metrics: vec!["Glucose".to_string(), "HbA1c".to_string()],
                    diagnostic_groups: vec!["Endocrine".to_string()],
                    diagnostics: vec!["Glucose Tolerance Test".to_string()],
                },
                Condition {
                    name: "Anaemia".to_string(),
                    diagnostic_metrics: vec!["Haemoglobin".to_string()],
                    diagnostic_groups: vec![],
                    diagnostics: vec![],
                },
            ],
            groups: vec![
                DiagnosticGroup {
                    name: "Metabolic".to_string(),
                    diagnostic_metrics: vec!["Glucose".to_string()],
                    diagnostics: vec![],
                },
                DiagnosticGroup {
                    name: "Endocrine".to_string(),
                    diagnostic_metrics: vec!["TSH".to_string()],
                    diagnostics: vec![],
                },
            ],
            diagnostics: vec![Diagnostic {
                name: "Fasting Glucose Test".to_string(),
                diagnostic_metrics: vec!["Glucose".to_string()],
            }],
        }
    }

    // --- metric resolution ---

    #[test]
    fn resolves_by_exact_normalized_name() {
        let kb = sample_kb();
        let found = find_matching_metric("glucose", None, &kb.metrics).expect("metric");
        assert_eq!(found.name, "Glucose");
    }

    #[test]
    fn units_hint_requires_exact_units_equality() {
        let kb = sample_kb();
        assert!(find_matching_metric("glucose", Some("mmol/L"), &kb.metrics).is_some());
        // A mismatching hint defeats the direct pass; the fuzzy second pass
        // still resolves the metric by name overlap.
        let fallback =
            find_matching_metric("glucose", Some("mg/dL"), &kb.metrics).expect("fuzzy pass");
        assert_eq!(fallback.name, "Glucose");
    }

    #[test]
    fn resolves_by_oru_code_alias() {
        let kb = sample_kb();
        let found = find_matching_metric("BGL", None, &kb.metrics).expect("metric");
        assert_eq!(found.name, "Glucose");
    }

    #[test]
    fn resolves_by_substring_in_either_direction() {
        let kb = sample_kb();
        let found = find_matching_metric("Cholesterol", None, &kb.metrics).expect("metric");
        assert_eq!(found.name, "Total Cholesterol");

        let found =
            find_matching_metric("Serum Haemoglobin Level", None, &kb.metrics).expect("metric");
        assert_eq!(found.name, "Haemoglobin");
    }

    #[test]
    fn first_match_wins_in_table_order() {
        let metrics = vec![
            metric("Glucose", "mmol/L", &[]),
            metric("GLUCOSE", "mg/dL", &[]),
        ];
        let found = find_matching_metric("glucose", None, &metrics).expect("metric");
        // Both rows normalize to the same name; the earlier row wins.
        assert_eq!(found.units, "mmol/L");
    }

    #[test]
    fn unmatched_name_yields_none() {
        let kb = sample_kb();
        assert!(find_matching_metric("Lipase", None, &kb.metrics).is_none());
        assert!(find_matching_metric("", None, &kb.metrics).is_none());
    }

    // --- relationship expansion ---

    #[test]
    fn expands_conditions_groups_and_diagnostics() {
        let kb = sample_kb();
        let result = analyze(&record("Glucose", "5.0", None, None), &PatientContext::default(), &kb);

        assert_eq!(result.related_conditions, vec!["Diabetes"]);
        assert_eq!(result.related_diagnostics, vec!["Fasting Glucose Test"]);
        // "Metabolic" lists the metric directly; "Endocrine" arrives through
        // the Diabetes condition hop.
        assert_eq!(result.related_diagnostic_groups, vec!["Metabolic", "Endocrine"]);
    }

    #[test]
    fn group_hop_deduplicates_by_exact_name() {
        let mut kb = sample_kb();
        // Declare the hop group on the condition AND directly on the metric.
        kb.groups[0].name = "Endocrine".to_string();
        let result = analyze(&record("Glucose", "5.0", None, None), &PatientContext::default(), &kb);
        let endocrine_count = result
            .related_diagnostic_groups
            .iter()
            .filter(|name| *name == "Endocrine")
            .count();
        assert_eq!(endocrine_count, 1);
    }

    #[test]
    fn unresolved_metric_leaves_relations_empty() {
        let kb = sample_kb();
        let result = analyze(&record("Lipase", "90", None, None), &PatientContext::default(), &kb);
        assert!(result.related_conditions.is_empty());
        assert!(result.related_diagnostic_groups.is_empty());
        assert!(result.related_diagnostics.is_empty());
    }

    // --- reference-range parsing ---

    #[test]
    fn parses_operator_ranges() {
        assert_eq!(
            parse_reference_range("<5"),
            ReferenceRange::LessThan { max: 5.0 }
        );
        assert_eq!(
            parse_reference_range("<= 5.5"),
            ReferenceRange::LessThanEqual { max: 5.5 }
        );
        assert_eq!(
            parse_reference_range("> 60"),
            ReferenceRange::GreaterThan { min: 60.0 }
        );
        assert_eq!(
            parse_reference_range(">=1.2"),
            ReferenceRange::GreaterThanEqual { min: 1.2 }
        );
    }

    #[test]
    fn parses_dash_ranges() {
        assert_eq!(
            parse_reference_range("4-10"),
            ReferenceRange::Range { min: 4.0, max: 10.0 }
        );
        assert_eq!(
            parse_reference_range(" 3.5 - 5.5 "),
            ReferenceRange::Range { min: 3.5, max: 5.5 }
        );
    }

    #[test]
    fn operator_precedes_dash_form() {
        // "<5" must classify as an upper bound even though no dash is
        // present; a dashless operator string never reaches the range branch.
        assert!(matches!(
            parse_reference_range("<5"),
            ReferenceRange::LessThan { .. }
        ));
    }

    #[test]
    fn unparseable_ranges_are_unknown() {
        assert_eq!(parse_reference_range("abc"), ReferenceRange::Unknown);
        assert_eq!(parse_reference_range("negative"), ReferenceRange::Unknown);
        assert_eq!(parse_reference_range("< high"), ReferenceRange::Unknown);
        assert_eq!(parse_reference_range(""), ReferenceRange::Unknown);
    }

    // --- severity ---

    #[test]
    fn critical_flags_decide_immediately() {
        for flag in ["C", "HH", "LL", "CC", "CL", "CH", "hh"] {
            let severity = determine_severity(
                &ObservationValue::Numeric(5.0),
                Some("3.5-5.5"),
                Some(flag),
            );
            assert_eq!(severity, Severity::Critical, "flag {flag}");
        }
    }

    #[test]
    fn abnormal_flags_override_an_in_range_value() {
        // Flag-driven: the range would say normal, the flag says abnormal.
        let severity = determine_severity(
            &ObservationValue::Numeric(5.0),
            Some("3.5-5.5"),
            Some("H"),
        );
        assert_eq!(severity, Severity::Abnormal);
    }

    #[test]
    fn unknown_flags_fall_through_to_range_evaluation() {
        let severity = determine_severity(
            &ObservationValue::Numeric(9.0),
            Some("4-8"),
            Some("XZ"),
        );
        assert_eq!(severity, Severity::Abnormal);
    }

    #[test]
    fn range_deviation_separates_abnormal_from_critical() {
        // (9-8)/(8-4) = 0.25 <= 0.3
        let severity = determine_severity(&ObservationValue::Numeric(9.0), Some("4-8"), None);
        assert_eq!(severity, Severity::Abnormal);

        // (12-8)/4 = 1.0 > 0.3
        let severity = determine_severity(&ObservationValue::Numeric(12.0), Some("4-8"), None);
        assert_eq!(severity, Severity::Critical);

        // Below the lower bound: (4-2)/4 = 0.5 > 0.3
        let severity = determine_severity(&ObservationValue::Numeric(2.0), Some("4-8"), None);
        assert_eq!(severity, Severity::Critical);

        let severity = determine_severity(&ObservationValue::Numeric(6.0), Some("4-8"), None);
        assert_eq!(severity, Severity::Normal);
    }

    #[test]
    fn upper_bound_ranges_use_the_half_deviation_threshold() {
        // 6/5.5 - 1 ≈ 0.09 <= 0.5
        let severity = determine_severity(&ObservationValue::Numeric(6.0), Some("<5.5"), None);
        assert_eq!(severity, Severity::Abnormal);

        // 9/5.5 - 1 ≈ 0.64 > 0.5
        let severity = determine_severity(&ObservationValue::Numeric(9.0), Some("<5.5"), None);
        assert_eq!(severity, Severity::Critical);

        // Exclusive bound: the boundary value itself violates "<".
        let severity = determine_severity(&ObservationValue::Numeric(5.5), Some("<5.5"), None);
        assert_eq!(severity, Severity::Abnormal);

        // Inclusive bound: the boundary value passes "<=".
        let severity = determine_severity(&ObservationValue::Numeric(5.5), Some("<=5.5"), None);
        assert_eq!(severity, Severity::Normal);
    }

    #[test]
    fn lower_bound_ranges_grade_low_values() {
        // 1 - 40/60 ≈ 0.33 > 0.3
        let severity = determine_severity(&ObservationValue::Numeric(40.0), Some(">60"), None);
        assert_eq!(severity, Severity::Critical);

        // 1 - 55/60 ≈ 0.08 <= 0.3
        let severity = determine_severity(&ObservationValue::Numeric(55.0), Some(">60"), None);
        assert_eq!(severity, Severity::Abnormal);

        let severity = determine_severity(&ObservationValue::Numeric(60.0), Some(">=60"), None);
        assert_eq!(severity, Severity::Normal);
    }

    #[test]
    fn text_values_classify_normal() {
        let severity = determine_severity(
            &ObservationValue::Text("No growth".to_string()),
            Some("4-8"),
            None,
        );
        assert_eq!(severity, Severity::Normal);
    }

    #[test]
    fn no_flag_and_no_range_is_normal() {
        let severity = determine_severity(&ObservationValue::Numeric(9.0), None, None);
        assert_eq!(severity, Severity::Normal);
    }

    // --- interpretations and risk ---

    #[test]
    fn flagged_glucose_gets_abnormal_sentence_diabetes_note_and_moderate_risk() {
        let kb = sample_kb();
        let ctx = PatientContext {
            age: Some(39),
            gender: Some("F".to_string()),
        };
        let result = analyze(
            &record("Glucose", "8.5", Some("3.5-5.5"), Some("H")),
            &ctx,
            &kb,
        );

        assert_eq!(result.severity, Severity::Abnormal);
        let notes = result.interpretations.expect("interpretations");
        assert_eq!(notes[0], "Abnormal Glucose level detected.");
        assert!(notes.contains(&"Elevated fasting glucose may indicate diabetes.".to_string()));
        assert_eq!(result.risk_level, Some(RiskLevel::Moderate));
    }

    #[test]
    fn critical_results_get_two_leading_sentences() {
        let kb = sample_kb();
        let result = analyze(
            &record("Glucose", "12.0", Some("4-8"), None),
            &PatientContext::default(),
            &kb,
        );

        assert_eq!(result.severity, Severity::Critical);
        let notes = result.interpretations.expect("interpretations");
        assert_eq!(notes[0], "Critical Glucose level detected.");
        assert_eq!(notes[1], "Immediate clinical attention may be required.");
        assert_eq!(result.risk_level, Some(RiskLevel::High));
    }

    #[test]
    fn anemia_thresholds_differ_by_gender() {
        let kb = sample_kb();
        let female = PatientContext {
            age: None,
            gender: Some("F".to_string()),
        };
        let male = PatientContext {
            age: None,
            gender: Some("M".to_string()),
        };

        let result = analyze(&record("Haemoglobin", "110", None, None), &female, &kb);
        let notes = result.interpretations.expect("female notes");
        assert!(notes.contains(&"Low hemoglobin may indicate anemia.".to_string()));

        // 110 is below the male threshold of 130 as well.
        let result = analyze(&record("Haemoglobin", "110", None, None), &male, &kb);
        let notes = result.interpretations.expect("male notes");
        assert!(notes.contains(&"Low hemoglobin may indicate anemia.".to_string()));

        // 125 is anemic for the male threshold only.
        let result = analyze(&record("Haemoglobin", "125", None, None), &female, &kb);
        assert!(result.interpretations.is_none());
        let result = analyze(&record("Haemoglobin", "125", None, None), &male, &kb);
        assert!(result.interpretations.is_some());
    }

    #[test]
    fn normal_results_without_named_rules_have_no_interpretations() {
        let kb = sample_kb();
        let result = analyze(
            &record("Haemoglobin", "140", Some("120-160"), None),
            &PatientContext {
                age: None,
                gender: Some("F".to_string()),
            },
            &kb,
        );
        assert_eq!(result.severity, Severity::Normal);
        assert!(result.interpretations.is_none());
        assert!(result.risk_level.is_none());
    }

    #[test]
    fn risk_level_is_limited_to_the_allow_list() {
        let kb = sample_kb();
        let result = analyze(
            &record("Total Cholesterol", "4.0", Some("<5.5"), None),
            &PatientContext::default(),
            &kb,
        );
        assert_eq!(result.risk_level, Some(RiskLevel::Low));

        let result = analyze(
            &record("Haemoglobin", "140", None, None),
            &PatientContext::default(),
            &kb,
        );
        assert!(result.risk_level.is_none());
    }

    #[test]
    fn value_is_restringified_for_the_response() {
        let kb = sample_kb();
        let result = analyze(
            &record("Glucose", "8.50", None, None),
            &PatientContext::default(),
            &kb,
        );
        assert_eq!(result.value, "8.5");
    }
}
