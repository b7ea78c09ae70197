//! Health check handler

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// `degraded` while the process is up but no classifier could be loaded
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let models_loaded = state.registry.available().len();

    Json(HealthResponse {
        status: if models_loaded > 0 { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        models_loaded,
        feature_schema: state.registry.schema().as_str(),
    })
}
