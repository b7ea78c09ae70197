//! PhishGuard API Server
//!
//! HTTP front end for the URL phishing classifiers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PHISHGUARD SERVER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /predict ──► UrlFeatureExtractor ──► FeatureRecord    │
//! │                                               │             │
//! │                                               ▼             │
//! │                    Arc<ClassifierRegistry> (read-only)      │
//! │                      lr · rf · dt  ──► PredictionResult     │
//! │                                                             │
//! │  GET /  ·  GET /health  ·  GET /models                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use phishguard_core::{ClassifierRegistry, UrlFeatureExtractor};
use std::sync::Arc;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ClassifierRegistry>,
    pub extractor: UrlFeatureExtractor,
    pub config: Config,
}

impl AppState {
    pub fn new(registry: ClassifierRegistry, config: Config) -> Self {
        Self {
            extractor: UrlFeatureExtractor::new(config.feature_schema),
            registry: Arc::new(registry),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/predict", post(handlers::predict::predict))
        .route("/health", get(handlers::health::check))
        .route("/models", get(handlers::models::list))
        .fallback(handlers::home::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
