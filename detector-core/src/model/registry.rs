//! Classifier Registry
//!
//! Built once at startup from the artifact directory and shared read-only
//! (`Arc<ClassifierRegistry>`) by every request. Models whose artifact is
//! missing or broken are logged and stay unavailable for the process lifetime.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::adapter::{FeatureRecord, PredictionAdapter};
use super::artifact::{load_feature_list, load_model, load_scaler, LoadedModel};
use super::classifier::Classifier;
use super::error::{ArtifactError, PredictError};
use super::prediction::{ModelId, PredictionResult};
use crate::features::{FeatureSchema, FeatureVector};

// ============================================================================
// CONFIG
// ============================================================================

/// Where the offline pipeline left its artifacts
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub schema: FeatureSchema,
    pub scaler_file: String,
    pub features_file: String,
}

impl ArtifactConfig {
    pub fn new(dir: impl Into<PathBuf>, schema: FeatureSchema) -> Self {
        Self {
            dir: dir.into(),
            schema,
            scaler_file: "scaler.json".to_string(),
            features_file: "features.json".to_string(),
        }
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join(&self.scaler_file)
    }

    pub fn features_path(&self) -> PathBuf {
        self.dir.join(&self.features_file)
    }

    pub fn model_path(&self, id: ModelId) -> PathBuf {
        self.dir.join(id.file_name())
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::new("models", FeatureSchema::default())
    }
}

// ============================================================================
// ENTRIES & STATS
// ============================================================================

#[derive(Debug, Default)]
struct InferenceStats {
    count: AtomicU64,
    latency_us_sum: AtomicU64,
}

impl InferenceStats {
    fn record(&self, elapsed_us: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.latency_us_sum.fetch_add(elapsed_us, Ordering::Relaxed);
    }

    fn avg_latency_ms(&self) -> f64 {
        let count = self.count.load(Ordering::Relaxed);
        let sum = self.latency_us_sum.load(Ordering::Relaxed);
        if count > 0 {
            (sum as f64 / count as f64) / 1000.0
        } else {
            0.0
        }
    }
}

struct ModelEntry {
    classifier: Box<dyn Classifier>,
    checksum: Option<String>,
    loaded_at: DateTime<Utc>,
    stats: InferenceStats,
}

/// Model status for the `/models` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub id: ModelId,
    pub key: &'static str,
    pub available: bool,
    pub kind: Option<&'static str>,
    pub n_features: Option<usize>,
    pub checksum: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub inference_count: u64,
    pub avg_latency_ms: f64,
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct ClassifierRegistry {
    schema: FeatureSchema,
    adapter: PredictionAdapter,
    models: BTreeMap<ModelId, ModelEntry>,
}

impl ClassifierRegistry {
    /// Empty registry around an adapter; models are added with `with_model`
    pub fn new(schema: FeatureSchema, adapter: PredictionAdapter) -> Self {
        log_schema_drift(schema, &adapter);
        Self {
            schema,
            adapter,
            models: BTreeMap::new(),
        }
    }

    /// Load scaler, feature list and every known model file.
    ///
    /// The scaler and feature list are required; a missing classifier only
    /// makes that one model unavailable.
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        log::info!("Loading artifacts from {}", config.dir.display());

        let feature_list = load_feature_list(&config.features_path())?;
        let scaler = load_scaler(&config.scaler_path())?;
        let adapter = PredictionAdapter::new(feature_list, scaler);

        if adapter.n_features() != adapter.scaler().n_features() {
            return Err(ArtifactError::invalid(
                "features",
                format!(
                    "feature list has {} names, scaler expects {}",
                    adapter.n_features(),
                    adapter.scaler().n_features()
                ),
            ));
        }

        let mut registry = Self::new(config.schema, adapter);

        for id in ModelId::ALL {
            let path = config.model_path(id);
            match load_model(&path).and_then(|m| registry.check_width(id, &path, m)) {
                Ok(loaded) => {
                    log::info!(
                        "Loaded {} ({}, {} features, sha256 {})",
                        id,
                        loaded.classifier.kind(),
                        loaded.classifier.n_features(),
                        &loaded.checksum[..12]
                    );
                    registry.insert(id, loaded.classifier, Some(loaded.checksum));
                }
                Err(e) => {
                    log::warn!("Model {} unavailable: {}", id, e);
                }
            }
        }

        if registry.models.is_empty() {
            log::warn!("No classifiers loaded; predictions will be refused");
        }

        Ok(registry)
    }

    fn check_width(
        &self,
        id: ModelId,
        path: &Path,
        loaded: LoadedModel,
    ) -> Result<LoadedModel, ArtifactError> {
        let expected = self.adapter.n_features();
        if loaded.classifier.n_features() != expected {
            return Err(ArtifactError::invalid(
                id.as_str(),
                format!(
                    "{} expects {} features, feature list has {}",
                    path.display(),
                    loaded.classifier.n_features(),
                    expected
                ),
            ));
        }
        Ok(loaded)
    }

    fn insert(&mut self, id: ModelId, classifier: Box<dyn Classifier>, checksum: Option<String>) {
        self.models.insert(
            id,
            ModelEntry {
                classifier,
                checksum,
                loaded_at: Utc::now(),
                stats: InferenceStats::default(),
            },
        );
    }

    /// Register an in-memory classifier (embedding, tests)
    pub fn with_model(
        mut self,
        id: ModelId,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if classifier.n_features() != self.adapter.n_features() {
            return Err(ArtifactError::invalid(
                id.as_str(),
                format!(
                    "classifier expects {} features, adapter provides {}",
                    classifier.n_features(),
                    self.adapter.n_features()
                ),
            ));
        }
        self.insert(id, classifier, None);
        Ok(self)
    }

    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    pub fn adapter(&self) -> &PredictionAdapter {
        &self.adapter
    }

    /// Loaded model ids in serving order
    pub fn available(&self) -> Vec<ModelId> {
        ModelId::ALL
            .into_iter()
            .filter(|id| self.models.contains_key(id))
            .collect()
    }

    pub fn is_available(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    fn entry(&self, id: ModelId) -> Result<&ModelEntry, PredictError> {
        self.models
            .get(&id)
            .ok_or_else(|| PredictError::ModelUnavailable {
                model: id.as_str().to_string(),
                available: self.available().iter().map(|m| m.as_str().to_string()).collect(),
            })
    }

    /// Predict on a row that is already standardized
    pub fn predict_scaled(&self, id: ModelId, row: &[f64]) -> Result<PredictionResult, PredictError> {
        let entry = self.entry(id)?;
        let start = Instant::now();

        let raw_label = entry.classifier.predict(row)?;
        let probability = entry.classifier.predict_probability(row)?;

        entry.stats.record(start.elapsed().as_micros() as u64);
        Ok(PredictionResult::new(id, raw_label, probability))
    }

    /// Default-fill, scale, then predict with one model
    pub fn predict(&self, id: ModelId, record: &FeatureRecord) -> Result<PredictionResult, PredictError> {
        self.entry(id)?;
        let row = self.adapter.scaled_row(record)?;
        self.predict_scaled(id, &row)
    }

    pub fn predict_vector(&self, id: ModelId, vector: &FeatureVector) -> Result<PredictionResult, PredictError> {
        self.predict(id, &FeatureRecord::from(vector))
    }

    /// Every known model in serving order. An unloaded model or the first
    /// failing one aborts the whole call; no partial results.
    pub fn predict_all(&self, record: &FeatureRecord) -> Result<Vec<PredictionResult>, PredictError> {
        for id in ModelId::ALL {
            self.entry(id)?;
        }
        let row = self.adapter.scaled_row(record)?;
        ModelId::ALL
            .into_iter()
            .map(|id| self.predict_scaled(id, &row))
            .collect()
    }

    pub fn status(&self) -> Vec<ModelStatus> {
        ModelId::ALL
            .into_iter()
            .map(|id| match self.models.get(&id) {
                Some(entry) => ModelStatus {
                    id,
                    key: id.key(),
                    available: true,
                    kind: Some(entry.classifier.kind()),
                    n_features: Some(entry.classifier.n_features()),
                    checksum: entry.checksum.clone(),
                    loaded_at: Some(entry.loaded_at),
                    inference_count: entry.stats.count.load(Ordering::Relaxed),
                    avg_latency_ms: entry.stats.avg_latency_ms(),
                },
                None => ModelStatus {
                    id,
                    key: id.key(),
                    available: false,
                    kind: None,
                    n_features: None,
                    checksum: None,
                    loaded_at: None,
                    inference_count: 0,
                    avg_latency_ms: 0.0,
                },
            })
            .collect()
    }
}

/// Warn when the extractor schema and the trained feature list disagree
fn log_schema_drift(schema: FeatureSchema, adapter: &PredictionAdapter) {
    let produced = schema.names();
    let zero_filled: Vec<&str> = adapter
        .feature_names()
        .iter()
        .map(|s| s.as_str())
        .filter(|name| !produced.contains(name))
        .collect();
    let dropped = produced
        .iter()
        .filter(|name| !adapter.feature_names().iter().any(|n| n == *name))
        .count();

    if !zero_filled.is_empty() {
        log::warn!(
            "Schema {} does not produce {:?}; these will be zero-filled",
            schema,
            zero_filled
        );
    }
    if dropped > 0 {
        log::info!("Schema {} produces {} features the models ignore", schema, dropped);
    }
}
