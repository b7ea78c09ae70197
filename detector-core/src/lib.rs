//! PhishGuard Core
//!
//! URL feature extraction and phishing classifier inference.
//!
//! ```text
//!   raw URL ──► features::UrlFeatureExtractor ──► FeatureVector (top20 | extended)
//!                                                     │
//!                                                     ▼
//!                          model::PredictionAdapter (default-fill, order, scale)
//!                                                     │
//!                                                     ▼
//!                 model::ClassifierRegistry ──► lr / rf / dt ──► PredictionResult
//! ```
//!
//! Everything here is synchronous and side-effect free once the registry is
//! loaded; the registry itself is immutable and safe to share across threads.

pub mod evaluation;
pub mod features;
pub mod model;

pub use features::{
    extract_features_from_url, extract_features_from_url_extended, FeatureExtractor,
    FeatureSchema, FeatureVector, LayoutInfo, UrlFeatureExtractor,
};
pub use model::{
    ArtifactConfig, ArtifactError, ClassifierRegistry, FeatureRecord, Label, ModelId,
    PredictError, PredictionResult,
};
