//! Evaluation Module - Offline Model Evaluation
//!
//! Scores every available classifier against a labeled, pre-scaled dataset
//! and ranks them by accuracy.

pub mod dataset;
pub mod metrics;

pub use dataset::{LabeledDataset, DEFAULT_TARGET};
pub use metrics::{ClassificationMetrics, ConfusionMatrix};

use serde::Serialize;

use crate::model::{ClassifierRegistry, ModelId, PredictError};

#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub model: ModelId,
    pub metrics: ClassificationMetrics,
    pub confusion: ConfusionMatrix,
}

/// Evaluate every available model; reports sorted by accuracy, best first
pub fn evaluate_registry(
    registry: &ClassifierRegistry,
    dataset: &LabeledDataset,
) -> Result<Vec<ModelReport>, PredictError> {
    let mut reports = Vec::new();

    for id in registry.available() {
        let predictions = dataset
            .rows
            .iter()
            .map(|row| registry.predict_scaled(id, row).map(|r| r.raw_label))
            .collect::<Result<Vec<u8>, _>>()?;

        let confusion = ConfusionMatrix::from_labels(&dataset.labels, &predictions);
        reports.push(ModelReport {
            model: id,
            metrics: ClassificationMetrics::from_confusion(&confusion),
            confusion,
        });
    }

    reports.sort_by(|a, b| b.metrics.accuracy.total_cmp(&a.metrics.accuracy));
    Ok(reports)
}
