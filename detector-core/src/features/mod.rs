//! Features Module - URL Feature Extraction Engine
//!
//! Splits the raw URL, computes lexical counters and structural pattern flags,
//! and lays them out in the order of the configured schema.

pub mod extract;
pub mod layout;
pub mod lexical;
pub mod patterns;
pub mod url_parts;
pub mod vector;


// Re-export common types
pub use extract::{
    extract_features_from_url, extract_features_from_url_extended, UrlFeatureExtractor,
};
pub use layout::{FeatureSchema, LayoutInfo};
pub use vector::{FeatureExtractor, FeatureVector};
