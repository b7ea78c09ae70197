//! Classifier Contract
//!
//! Trained models are black boxes behind one trait so they can be swapped
//! without touching the serving path.

use super::error::PredictError;

/// Binary classifier over a scaled feature row
pub trait Classifier: Send + Sync {
    /// Short model family name (e.g. "logistic_regression")
    fn kind(&self) -> &'static str;

    /// Row width the model was trained on
    fn n_features(&self) -> usize;

    /// Raw label: 1 = phishing, 0 = legitimate
    fn predict(&self, row: &[f64]) -> Result<u8, PredictError>;

    /// Probability of the phishing class, when the model exposes one
    fn predict_probability(&self, _row: &[f64]) -> Result<Option<f64>, PredictError> {
        Ok(None)
    }
}

/// Shared row checks for concrete classifiers
pub(crate) fn check_row(row: &[f64], expected: usize) -> Result<(), PredictError> {
    if row.len() != expected {
        return Err(PredictError::DimensionMismatch {
            expected,
            got: row.len(),
        });
    }
    if let Some(i) = row.iter().position(|v| !v.is_finite()) {
        return Err(PredictError::NonFinite(i));
    }
    Ok(())
}

/// Index of the largest class weight; ties resolve to the lower class
pub(crate) fn argmax(weights: &[f64]) -> usize {
    let mut best = 0;
    for (i, w) in weights.iter().enumerate().skip(1) {
        if *w > weights[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_row() {
        assert!(check_row(&[1.0, 2.0], 2).is_ok());
        assert_eq!(
            check_row(&[1.0], 2),
            Err(PredictError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(check_row(&[1.0, f64::NAN], 2), Err(PredictError::NonFinite(1)));
    }

    #[test]
    fn test_argmax_ties_to_lower_class() {
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[0.2, 0.8]), 1);
        assert_eq!(argmax(&[]), 0);
    }
}
