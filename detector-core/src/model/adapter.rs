//! Prediction Adapter
//!
//! Builds the fixed-order numeric row a trained classifier expects from a
//! loosely-typed feature record. Tolerates schema drift between extractor
//! versions and model versions:
//! - names missing from the record are filled with 0.0
//! - names not in the target list are ignored
//! - values that do not coerce to a finite number become 0.0

use serde_json::Value;
use std::collections::HashMap;

use super::error::PredictError;
use super::scaler::StandardScaler;
use crate::features::FeatureVector;

/// Raw name → value record, as received from callers or an older extractor
#[derive(Debug, Clone, Default)]
pub struct FeatureRecord {
    values: HashMap<String, Value>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&FeatureVector> for FeatureRecord {
    fn from(vector: &FeatureVector) -> Self {
        let mut record = FeatureRecord::new();
        for (name, value) in vector.iter() {
            record.insert(name, value);
        }
        record
    }
}

impl From<HashMap<String, Value>> for FeatureRecord {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

impl From<serde_json::Map<String, Value>> for FeatureRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

/// Default-fill coercion: anything that is not a finite number becomes 0.0
pub fn coerce_numeric(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Fixed-order row for the target names
pub fn prepare_row(record: &FeatureRecord, target_names: &[String]) -> Vec<f64> {
    target_names
        .iter()
        .map(|name| record.get(name).map(coerce_numeric).unwrap_or(0.0))
        .collect()
}

/// Row preparation + standardization for one trained model family
#[derive(Debug, Clone)]
pub struct PredictionAdapter {
    feature_names: Vec<String>,
    scaler: StandardScaler,
}

impl PredictionAdapter {
    /// The scaler's own column names win over the persisted feature list
    pub fn new(feature_list: Vec<String>, scaler: StandardScaler) -> Self {
        let feature_names = scaler.feature_names_in.clone().unwrap_or(feature_list);
        Self {
            feature_names,
            scaler,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Names the model expects that the given record does not provide
    pub fn missing_names(&self, record: &FeatureRecord) -> Vec<&str> {
        self.feature_names
            .iter()
            .filter(|name| record.get(name).is_none())
            .map(|s| s.as_str())
            .collect()
    }

    pub fn raw_row(&self, record: &FeatureRecord) -> Vec<f64> {
        prepare_row(record, &self.feature_names)
    }

    pub fn scaled_row(&self, record: &FeatureRecord) -> Result<Vec<f64>, PredictError> {
        self.scaler.transform(&self.raw_row(record))
    }
}
