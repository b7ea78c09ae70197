//! Persisted Artifacts
//!
//! JSON exports produced by the offline training pipeline: the ordered
//! feature list, the fitted scaler, and one file per classifier.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::classifier::Classifier;
use super::error::ArtifactError;
use super::forest::RandomForest;
use super::linear::LogisticRegression;
use super::scaler::StandardScaler;
use super::tree::DecisionTree;

/// One serialized classifier, tagged by model family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl ModelArtifact {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.validate(),
            ModelArtifact::DecisionTree(m) => m.validate(),
            ModelArtifact::RandomForest(m) => m.validate(),
        }
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ModelArtifact::LogisticRegression(m) => Box::new(m),
            ModelArtifact::DecisionTree(m) => Box::new(m),
            ModelArtifact::RandomForest(m) => Box::new(m),
        }
    }
}

/// Raw bytes of an artifact file
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_artifact<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Hex SHA-256 of artifact bytes
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Ordered feature-name list (JSON array of strings)
pub fn load_feature_list(path: &Path) -> Result<Vec<String>, ArtifactError> {
    let bytes = read_artifact(path)?;
    let names: Vec<String> = parse_artifact(path, &bytes)?;
    if names.is_empty() {
        return Err(ArtifactError::invalid("features", "feature list is empty"));
    }
    Ok(names)
}

pub fn load_scaler(path: &Path) -> Result<StandardScaler, ArtifactError> {
    let bytes = read_artifact(path)?;
    let scaler: StandardScaler = parse_artifact(path, &bytes)?;
    scaler.validate()?;
    Ok(scaler)
}

/// Loaded classifier plus its file checksum
pub struct LoadedModel {
    pub classifier: Box<dyn Classifier>,
    pub checksum: String,
}

pub fn load_model(path: &Path) -> Result<LoadedModel, ArtifactError> {
    let bytes = read_artifact(path)?;
    let artifact: ModelArtifact = parse_artifact(path, &bytes)?;
    artifact.validate()?;
    Ok(LoadedModel {
        classifier: artifact.into_classifier(),
        checksum: checksum(&bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_tagged_model_artifact() {
        let json = r#"{"kind": "logistic_regression", "coef": [1.0, -1.0], "intercept": 0.0}"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(artifact.validate().is_ok());

        let classifier = artifact.into_classifier();
        assert_eq!(classifier.kind(), "logistic_regression");
        assert_eq!(classifier.n_features(), 2);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "svm", "coef": [1.0]}"#;
        assert!(serde_json::from_str::<ModelArtifact>(json).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_feature_list(&PathBuf::from("/nonexistent/features.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound(_)));
    }

    #[test]
    fn test_load_model_records_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lr.json");
        let body = r#"{"kind": "logistic_regression", "coef": [0.5], "intercept": 0.1}"#;
        fs::write(&path, body).unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.checksum, checksum(body.as_bytes()));
        assert_eq!(loaded.checksum.len(), 64);
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        fs::write(&path, "not json").unwrap();

        let err = load_scaler(&path).unwrap_err();
        assert!(err.to_string().contains("scaler.json"));
    }
}
