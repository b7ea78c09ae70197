//! Decision Tree (inference only)
//!
//! Flattened node arrays, the same shape scikit-learn keeps in `tree_`:
//! node `i` splits on `feature[i] <= threshold[i]` and goes to
//! `children_left[i]` / `children_right[i]`; a leaf has `children_left == -1`.
//! `value[i]` holds the per-class weights at that node (class 0, class 1).

use serde::{Deserialize, Serialize};

use super::classifier::{argmax, check_row, Classifier};
use super::error::{ArtifactError, PredictError};

pub const LEAF: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.children_left.len()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ArtifactError::invalid("decision_tree", "tree has no nodes"));
        }
        let lengths = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(ArtifactError::invalid(
                "decision_tree",
                format!("node arrays disagree in length (expected {})", n),
            ));
        }

        for i in 0..n {
            let (left, right) = (self.children_left[i], self.children_right[i]);
            if left == LEAF {
                if self.value[i].is_empty() || self.value[i].iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ArtifactError::invalid(
                        "decision_tree",
                        format!("leaf {} has invalid class weights", i),
                    ));
                }
                continue;
            }
            // Children always come after their parent in the flattened order
            let in_range = |c: i64| c > i as i64 && (c as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(ArtifactError::invalid(
                    "decision_tree",
                    format!("node {} has out-of-range children ({}, {})", i, left, right),
                ));
            }
            let f = self.feature[i];
            if f < 0 || f as usize >= self.n_features {
                return Err(ArtifactError::invalid(
                    "decision_tree",
                    format!("node {} splits on feature {} of {}", i, f, self.n_features),
                ));
            }
        }
        Ok(())
    }

    /// Index of the leaf reached by this row
    fn leaf_for(&self, row: &[f64]) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let f = self.feature[node] as usize;
            node = if row[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        node
    }

    /// Normalized class distribution at the leaf (class 0, class 1)
    pub fn class_distribution(&self, row: &[f64]) -> Result<[f64; 2], PredictError> {
        check_row(row, self.n_features)?;
        let weights = &self.value[self.leaf_for(row)];
        let w0 = weights.first().copied().unwrap_or(0.0);
        let w1 = weights.get(1).copied().unwrap_or(0.0);
        let total = w0 + w1;
        if total > 0.0 {
            Ok([w0 / total, w1 / total])
        } else {
            Ok([1.0, 0.0])
        }
    }
}

impl Classifier for DecisionTree {
    fn kind(&self) -> &'static str {
        "decision_tree"
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
