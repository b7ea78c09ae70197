//! Model status handler

use axum::{extract::State, Json};
use phishguard_core::LayoutInfo;

use crate::models::ModelsResponse;
use crate::AppState;

pub async fn list(State(state): State<AppState>) -> Json<ModelsResponse> {
    let registry = &state.registry;

    Json(ModelsResponse {
        models: registry.status(),
        layout: LayoutInfo::for_schema(registry.schema()),
        trained_features: registry.adapter().feature_names().to_vec(),
        generated_at: chrono::Utc::now(),
    })
}
