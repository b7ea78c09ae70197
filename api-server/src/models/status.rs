//! Service status models

use chrono::{DateTime, Utc};
use phishguard_core::model::ModelStatus;
use phishguard_core::LayoutInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
    pub models_loaded: usize,
    pub feature_schema: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelStatus>,
    /// Layout the extractor produces
    pub layout: LayoutInfo,
    /// Feature order the loaded models were trained on
    pub trained_features: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
