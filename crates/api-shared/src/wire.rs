//! Wire types for the analyze API.
//!
//! These are the exact JSON shapes the REST surface speaks: camelCase
//! field names, optional fields omitted when absent. The core crate builds
//! them; the API crates only serialize them.

use lra_types::{RiskLevel, Severity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Analyze request: the decoded message text.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReq {
    /// Raw message content; line endings may be in any form.
    pub content: String,
}

/// Patient demographics as returned to API clients.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: String,
    pub patient_name: String,
    pub date_of_birth: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One fully analysed observation.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedResult {
    pub test_name: String,
    /// Display form of the observation value.
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_range: Option<String>,
    pub severity: Severity,
    pub related_conditions: Vec<String>,
    pub related_diagnostic_groups: Vec<String>,
    pub related_diagnostics: Vec<String>,
    /// Ordered interpretation sentences; absent rather than empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

/// Patient-level context echoed in the summary.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// Count summary over all analysed results.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_results: usize,
    pub critical_count: usize,
    pub abnormal_count: usize,
    pub normal_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<PatientInfo>,
}

/// Severity-partitioned view of the analysed results.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupedResults {
    pub critical: Vec<AnalyzedResult>,
    pub abnormal: Vec<AnalyzedResult>,
    pub normal: Vec<AnalyzedResult>,
}

/// Aggregated analysis produced by the core, transport-agnostic.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Analysed results in message order.
    pub results: Vec<AnalyzedResult>,
    pub summary: AnalysisSummary,
    pub grouped_results: GroupedResults,
}

/// Full analyze endpoint response.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRes {
    pub success: bool,
    pub message: String,
    pub patient: Patient,
    pub results: Vec<AnalyzedResult>,
    pub summary: AnalysisSummary,
    pub grouped_results: GroupedResults,
}
