//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want
//! the REST server (with OpenAPI/Swagger UI). The workspace's main
//! `lra-run` binary is the production entry point.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use lra_core::{CoreConfig, DEFAULT_KNOWLEDGE_DIR};

/// Main entry point for the LRA REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000) with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `LRA_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `LRA_KNOWLEDGE_DIR`: Knowledge-base directory (default: "knowledge_data")
///
/// # Returns
/// * `Ok(())` - If server starts and runs successfully
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the knowledge-base directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("LRA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting LRA REST API on {}", addr);

    let knowledge_dir =
        std::env::var("LRA_KNOWLEDGE_DIR").unwrap_or_else(|_| DEFAULT_KNOWLEDGE_DIR.into());
    let knowledge_path = Path::new(&knowledge_dir);
    if !knowledge_path.exists() {
        anyhow::bail!(
            "Knowledge base directory does not exist: {}",
            knowledge_path.display()
        );
    }

    let cfg = Arc::new(CoreConfig::new(knowledge_path.to_path_buf())?);
    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
