//! Model Errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading persisted artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {name}: {reason}")]
    Invalid { name: String, reason: String },
}

impl ArtifactError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ArtifactError::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Failures at prediction time
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Model '{model}' not found! Choose from {available:?}")]
    ModelUnavailable {
        model: String,
        available: Vec<String>,
    },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Non-finite value in feature row at index {0}")]
    NonFinite(usize),

    #[error("{0}")]
    Model(String),
}
