//! Main entry point for the LRA application.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState};
use lra_core::{CoreConfig, DEFAULT_KNOWLEDGE_DIR};

/// Main entry point for the LRA application
///
/// Starts the REST server with the analyze and health endpoints plus the
/// Swagger UI.
///
/// # Environment Variables
/// - `LRA_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `LRA_KNOWLEDGE_DIR`: Directory holding the knowledge-base CSV tables
///   (default: "knowledge_data")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("lra=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("LRA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let knowledge_dir =
        std::env::var("LRA_KNOWLEDGE_DIR").unwrap_or_else(|_| DEFAULT_KNOWLEDGE_DIR.into());

    let knowledge_path = Path::new(&knowledge_dir);
    if !knowledge_path.exists() {
        anyhow::bail!(
            "Knowledge base directory does not exist: {}",
            knowledge_path.display()
        );
    }

    tracing::info!("++ Starting LRA REST on {}", rest_addr);
    tracing::info!("++ Knowledge base directory: {}", knowledge_path.display());

    let cfg = Arc::new(CoreConfig::new(knowledge_path.to_path_buf())?);
    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
