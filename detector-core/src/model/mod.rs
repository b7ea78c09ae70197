//! Model Module - Classifier Inference
//!
//! Prediction adapter, standardization, black-box classifiers and the
//! immutable registry that serves them.

pub mod adapter;
pub mod artifact;
pub mod classifier;
pub mod error;
pub mod forest;
pub mod linear;
pub mod prediction;
pub mod registry;
pub mod scaler;
pub mod tree;

// Re-export common types
pub use adapter::{coerce_numeric, prepare_row, FeatureRecord, PredictionAdapter};
pub use artifact::ModelArtifact;
pub use classifier::Classifier;
pub use error::{ArtifactError, PredictError};
pub use prediction::{Label, ModelId, PredictionResult};
pub use registry::{ArtifactConfig, ClassifierRegistry, ModelStatus};
pub use scaler::StandardScaler;
