//! Standardization Transform
//!
//! Applies a pre-fit `(x - mean) / scale` rescaling. Parameters come from an
//! offline export of a fitted StandardScaler; nothing is fitted here.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{ArtifactError, PredictError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column names seen at fit time, when the export carries them
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names_in: None,
            mean,
            scale,
        }
    }

    /// Identity transform of the given width
    pub fn identity(n_features: usize) -> Self {
        Self::new(vec![0.0; n_features], vec![1.0; n_features])
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names_in = Some(names);
        self
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.mean.len() != self.scale.len() {
            return Err(ArtifactError::invalid(
                "scaler",
                format!("mean has {} entries, scale has {}", self.mean.len(), self.scale.len()),
            ));
        }
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.mean.len() {
                return Err(ArtifactError::invalid(
                    "scaler",
                    format!(
                        "feature_names_in has {} entries, mean has {}",
                        names.len(),
                        self.mean.len()
                    ),
                ));
            }
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(ArtifactError::invalid("scaler", format!("non-finite mean at {}", i)));
        }
        Ok(())
    }

    /// Standardize one row
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictError> {
        if row.len() != self.n_features() {
            return Err(PredictError::DimensionMismatch {
                expected: self.n_features(),
                got: row.len(),
            });
        }

        let x = Array1::from(row.to_vec());
        let mean = Array1::from(self.mean.clone());
        // Zero-variance columns keep scale 1.0
        let scale = Array1::from(self.scale.clone())
            .mapv(|s| if s.is_finite() && s != 0.0 { s } else { 1.0 });

        Ok(((x - mean) / scale).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 5.0]);
        assert_eq!(scaler.transform(&[3.0, 0.0]).unwrap(), vec![1.0, -2.0]);
    }

    #[test]
    fn test_zero_scale_treated_as_one() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]);
        assert_eq!(scaler.transform(&[4.0]).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let scaler = StandardScaler::identity(3);
        assert_eq!(
            scaler.transform(&[1.0]),
            Err(PredictError::DimensionMismatch { expected: 3, got: 1 })
        );
    }

    #[test]
    fn test_validate() {
        assert!(StandardScaler::identity(2).validate().is_ok());
        assert!(StandardScaler::new(vec![0.0], vec![1.0, 1.0]).validate().is_err());
        assert!(StandardScaler::identity(2)
            .with_feature_names(vec!["a".into()])
            .validate()
            .is_err());
    }

    #[test]
    fn test_deserialize_export() {
        let json = r#"{"feature_names_in": ["a", "b"], "mean": [0.5, 1.5], "scale": [1.0, 2.0]}"#;
        let scaler: StandardScaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.feature_names_in.as_deref().map(|n| n.len()), Some(2));

        let json = r#"{"mean": [0.0], "scale": [1.0]}"#;
        let scaler: StandardScaler = serde_json::from_str(json).unwrap();
        assert!(scaler.feature_names_in.is_none());
    }
}
