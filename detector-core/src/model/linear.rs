//! Logistic Regression (inference only)

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::classifier::{check_row, Classifier};
use super::error::{ArtifactError, PredictError};

/// Fitted logistic regression: p = σ(w·x + b)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self { coef, intercept }
    }

    /// Numerically stable sigmoid
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    pub fn decision_function(&self, row: &[f64]) -> Result<f64, PredictError> {
        check_row(row, self.coef.len())?;
        let w = ArrayView1::from(&self.coef[..]);
        let x = ArrayView1::from(row);
        Ok(w.dot(&x) + self.intercept)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.coef.is_empty() {
            return Err(ArtifactError::invalid("logistic_regression", "empty coefficient vector"));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::invalid("logistic_regression", "non-finite parameter"));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, row: &[f64]) -> Result<u8, PredictError> {
        Ok(u8::from(self.decision_function(row)? > 0.0))
    }

    fn predict_probability(&self, row: &[f64]) -> Result<Option<f64>, PredictError> {
        Ok(Some(Self::sigmoid(self.decision_function(row)?)))
    }
}
