//! # API REST
//!
//! REST API implementation for LRA.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! The router lives here so the workspace `lra-run` binary and the
//! standalone `lra-api-rest` binary serve identical endpoints.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::wire::{AnalyzeReq, AnalyzeRes, HealthRes};
use api_shared::HealthService;
use knowledge::KnowledgeBase;
use lra_core::{patient_wire, prepare_analysis_response, CoreConfig};

/// Application state for the REST API server
///
/// Contains shared state that needs to be accessible to all request
/// handlers, currently the startup-resolved core configuration.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze),
    components(schemas(
        HealthRes,
        AnalyzeReq,
        AnalyzeRes,
        api_shared::wire::Patient,
        api_shared::wire::AnalyzedResult,
        api_shared::wire::AnalysisSummary,
        api_shared::wire::PatientInfo,
        api_shared::wire::GroupedResults,
        lra_types::Severity,
        lra_types::RiskLevel,
    ))
)]
struct ApiDoc;

/// Build the REST router with all endpoints and the Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns the current health status of the LRA REST API service.
/// This endpoint is used for monitoring and load balancer health checks.
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Message analysed", body = AnalyzeRes),
        (status = 400, description = "Bad request"),
        (status = 422, description = "Message has no patient segment")
    )
)]
/// Analyse an ORU result message
///
/// Parses the message, classifies every observation against the knowledge
/// base, and returns the severity-partitioned analysis.
///
/// # Arguments
/// * `req` - Request body carrying the raw message content
///
/// # Returns
/// * `Ok(Json<AnalyzeRes>)` - Patient demographics plus analysed results
/// * `Err((StatusCode, &str))` - Rejection when the message is unusable
///
/// # Errors
/// Returns `400 Bad Request` when the content is empty, and
/// `422 Unprocessable Entity` when no patient segment is present.
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeReq>,
) -> Result<Json<AnalyzeRes>, (StatusCode, &'static str)> {
    if req.content.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Empty message content"));
    }

    let normalized = hl7::normalize_line_endings(&req.content);
    let parsed = match hl7::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!("Message parse error: {:?}", e);
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                "No PID segment found in message",
            ));
        }
    };

    let kb = KnowledgeBase::load_dir(state.cfg.knowledge_dir());
    if kb.is_empty() {
        tracing::warn!(
            "knowledge base at {} is empty; related entities will be absent",
            state.cfg.knowledge_dir().display()
        );
    }

    let analysis = prepare_analysis_response(&parsed, &kb);
    Ok(Json(AnalyzeRes {
        success: true,
        message: "Message processed successfully".to_string(),
        patient: patient_wire(&parsed.patient),
        results: analysis.results,
        summary: analysis.summary,
        grouped_results: analysis.grouped_results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_dir(dir: &std::path::Path) -> AppState {
        let cfg = CoreConfig::new(dir.to_path_buf()).expect("config");
        AppState::new(Arc::new(cfg))
    }

    #[tokio::test]
    async fn analyze_rejects_empty_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = analyze(
            State(state_with_dir(dir.path())),
            Json(AnalyzeReq {
                content: "  \n ".to_string(),
            }),
        )
        .await;
        assert_eq!(result.err(), Some((StatusCode::BAD_REQUEST, "Empty message content")));
    }

    #[tokio::test]
    async fn analyze_rejects_messages_without_pid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = analyze(
            State(state_with_dir(dir.path())),
            Json(AnalyzeReq {
                content: "OBX|1|NM|GLU^Glucose||8.5|||".to_string(),
            }),
        )
        .await;
        assert_eq!(
            result.err(),
            Some((
                StatusCode::UNPROCESSABLE_ENTITY,
                "No PID segment found in message"
            ))
        );
    }

    #[tokio::test]
    async fn analyze_returns_grouped_results() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = "PID|1||12345||Smith^Jane||19850212|F\r\n\
            OBX|1|NM|GLU^Glucose||8.5|mmol/L|3.5-5.5|H|||F\r\n";

        let Json(res) = analyze(
            State(state_with_dir(dir.path())),
            Json(AnalyzeReq {
                content: content.to_string(),
            }),
        )
        .await
        .expect("analyze");

        assert!(res.success);
        assert_eq!(res.patient.patient_name, "Jane Smith");
        assert_eq!(res.summary.total_results, 1);
        assert_eq!(res.summary.abnormal_count, 1);
        assert_eq!(res.grouped_results.abnormal[0].test_name, "Glucose");
    }
}
