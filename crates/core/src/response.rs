//! Aggregation of per-record analyses into the API response.
//!
//! A trivial fold: analyse every record in message order, partition by
//! severity, and fill the count summary. The partition is commutative, so
//! the grouping is identical regardless of the order records were analysed
//! in.

use chrono::{Datelike, Utc};

use api_shared::wire::{
    AnalysisResponse, AnalysisSummary, AnalyzedResult, GroupedResults, Patient, PatientInfo,
};
use hl7::ParsedMessage;
use knowledge::KnowledgeBase;
use lra_types::Severity;

use crate::analyzer::{analyze, PatientContext};

/// Derive the patient-level context the interpretation rules consult.
///
/// Age is whole years as of now, computed from the birth year alone; a date
/// of birth that does not start with a four-digit year yields no age.
pub fn patient_context(patient: &hl7::Patient) -> PatientContext {
    let age = patient
        .date_of_birth
        .get(0..4)
        .and_then(|year| year.parse::<i32>().ok())
        .map(|birth_year| Utc::now().year() - birth_year);

    let gender = if patient.gender.is_empty() {
        None
    } else {
        Some(patient.gender.clone())
    };

    PatientContext { age, gender }
}

/// Convert parsed demographics into the wire form returned to API clients.
pub fn patient_wire(patient: &hl7::Patient) -> Patient {
    Patient {
        patient_id: patient.patient_id.clone(),
        patient_name: patient.patient_name.clone(),
        date_of_birth: patient.date_of_birth.clone(),
        gender: patient.gender.clone(),
        address: patient.address.clone(),
        phone: patient.phone.clone(),
    }
}

/// Analyse every observation and aggregate the severity-partitioned response.
pub fn prepare_analysis_response(
    parsed: &ParsedMessage,
    kb: &KnowledgeBase,
) -> AnalysisResponse {
    let ctx = patient_context(&parsed.patient);

    let results: Vec<AnalyzedResult> = parsed
        .results
        .iter()
        .map(|record| analyze(record, &ctx, kb))
        .collect();

    let critical: Vec<AnalyzedResult> = results
        .iter()
        .filter(|result| result.severity == Severity::Critical)
        .cloned()
        .collect();
    let abnormal: Vec<AnalyzedResult> = results
        .iter()
        .filter(|result| result.severity == Severity::Abnormal)
        .cloned()
        .collect();
    let normal: Vec<AnalyzedResult> = results
        .iter()
        .filter(|result| result.severity == Severity::Normal)
        .cloned()
        .collect();

    let patient_info = if results.is_empty() {
        None
    } else {
        Some(PatientInfo {
            age: ctx.age,
            gender: ctx.gender.clone(),
        })
    };

    AnalysisResponse {
        summary: AnalysisSummary {
            total_results: results.len(),
            critical_count: critical.len(),
            abnormal_count: abnormal.len(),
            normal_count: normal.len(),
            patient_info,
        },
        grouped_results: GroupedResults {
            critical,
            abnormal,
            normal,
        },
        results,
    }
}
