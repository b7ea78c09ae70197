//! Random Forest (inference only)
//!
//! Soft voting: the phishing probability is the mean of the per-tree leaf
//! distributions, and the label is the argmax of that mean.

use serde::{Deserialize, Serialize};

use super::classifier::{argmax, check_row, Classifier};
use super::error::{ArtifactError, PredictError};
use super::tree::DecisionTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub estimators: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn n_trees(&self) -> usize {
        self.estimators.len()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.estimators.is_empty() {
            return Err(ArtifactError::invalid("random_forest", "forest has no estimators"));
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            if tree.n_features != self.n_features {
                return Err(ArtifactError::invalid(
                    "random_forest",
                    format!(
                        "estimator {} expects {} features, forest expects {}",
                        i, tree.n_features, self.n_features
                    ),
                ));
            }
            tree.validate().map_err(|e| {
                ArtifactError::invalid("random_forest", format!("estimator {}: {}", i, e))
            })?;
        }
        Ok(())
    }

    /// Averaged class distribution over all trees
    pub fn class_distribution(&self, row: &[f64]) -> Result<[f64; 2], PredictError> {
        check_row(row, self.n_features)?;

        let mut sum = [0.0f64; 2];
        for tree in &self.estimators {
            let dist = tree.class_distribution(row)?;
            sum[0] += dist[0];
            sum[1] += dist[1];
        }

        let n = self.estimators.len().max(1) as f64;
        Ok([sum[0] / n, sum[1] / n])
    }
}

impl Classifier for RandomForest {
    fn kind(&self) -> &'static str {
        "random_forest"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, row: &[f64]) -> Result<u8, PredictError> {
        Ok(argmax(&self.class_distribution(row)?) as u8)
    }

    fn predict_probability(&self, row: &[f64]) -> Result<Option<f64>, PredictError> {
        Ok(Some(self.class_distribution(row)?[1]))
    }
}
