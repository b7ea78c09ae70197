//! Feature Vector - Core data structure for model input
//!
//! An ordered mapping from feature name to value, tagged with the schema that
//! produced it. Every schema name is always present; unset values stay `0.0`.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::layout::{feature_index, FeatureSchema};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: FeatureSchema,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Create a zeroed vector for the given schema
    pub fn new(schema: FeatureSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.feature_count()],
        }
    }

    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Feature names in layout order
    pub fn names(&self) -> &'static [&'static str] {
        self.schema.names()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(self.schema, name).map(|i| self.values[i])
    }

    /// Set feature by name. Returns false for names outside the schema.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match feature_index(self.schema, name) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    /// Set a boolean-style feature as 0.0 / 1.0
    pub fn set_flag(&mut self, name: &str, flag: bool) -> bool {
        self.set(name, if flag { 1.0 } else { 0.0 })
    }

    /// (name, value) pairs in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema.names().iter().copied().zip(self.values.iter().copied())
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_schema": self.schema.as_str(),
            "feature_version": self.schema.version(),
            "layout_hash": self.schema.layout_hash(),
            "values": self,
        })
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for URL feature extractors
pub trait FeatureExtractor: Send + Sync {
    /// Schema of the vectors this extractor produces
    fn schema(&self) -> FeatureSchema;

    /// Extract the full feature vector for a raw URL string
    fn extract(&self, url: &str) -> FeatureVector;
}

// ============================================================================
// TESTS
// ============================================================================
