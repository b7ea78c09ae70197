//! PhishGuard API Server binary

use anyhow::{Context, Result};
use phishguard_core::ClassifierRegistry;
use phishguard_server::{create_router, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "phishguard_server=debug,phishguard_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG / LOG_FORMAT can come from it
    dotenvy::dotenv().ok();

    // Initialize logging
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("PhishGuard server starting ({})...", config.environment);
    tracing::info!(
        "Artifacts: {} (feature schema: {})",
        config.artifact_dir.display(),
        config.feature_schema
    );

    // Scaler and feature list are required; individual models may be missing
    let registry = ClassifierRegistry::load(&config.artifacts())
        .context("Failed to load model artifacts")?;

    let available = registry.available();
    if available.is_empty() {
        tracing::warn!("No classifier could be loaded; /predict will answer 503");
    } else {
        tracing::info!("Models loaded: {:?}", available);
    }
    if !config.is_production() {
        tracing::debug!("Trained feature order: {:?}", registry.adapter().feature_names());
    }

    let addr = config.bind_addr();
    let app = create_router(AppState::new(registry, config));

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
