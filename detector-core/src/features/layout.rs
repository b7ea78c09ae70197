//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema**
//!
//! ## Rules (never break these):
//! 1. Add feature → new schema or bump the layout version
//! 2. Change order → bump the layout version
//! 3. Remove feature → bump the layout version
//!
//! Trained scalers and classifiers are fitted against one exact ordered name
//! list. The active schema is therefore an explicit configuration value, never
//! inferred from whichever artifact files exist on disk.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// FEATURE LAYOUTS (Authoritative source)
// ============================================================================

/// Top-20 URL features, in the order the deployed models were trained on.
pub const TOP20_LAYOUT: &[&str] = &[
    // === Size (0-4) ===
    "length_url",          // 0: characters in the full URL
    "length_hostname",     // 1: characters in the hostname
    "nb_dots",             // 2: '.' in hostname
    "nb_hyphens",          // 3: '-' in hostname
    "nb_at",               // 4: '@' in full URL

    // === Ratios (5-6) ===
    "ratio_digits_url",    // 5: digits / URL length
    "ratio_digits_host",   // 6: digits / hostname length

    // === Path words (7-9) ===
    "shortest_words_raw",  // 7
    "longest_words_raw",   // 8
    "avg_words_raw",       // 9

    // === Structure flags (10-17) ===
    "tld_in_path",         // 10
    "abnormal_subdomain",  // 11
    "nb_subdomains",       // 12
    "prefix_suffix",       // 13
    "random_domain",       // 14
    "shortening_service",  // 15
    "path_extension",      // 16
    "nb_redirection",      // 17

    // === Page-content placeholders (18-19), always 0 ===
    "ratio_extHyperlinks", // 18
    "ratio_intErrors",     // 19
];

/// Extended layout: the top-20 set followed by five URL-only signals.
pub const EXTENDED_LAYOUT: &[&str] = &[
    "length_url",
    "length_hostname",
    "nb_dots",
    "nb_hyphens",
    "nb_at",
    "ratio_digits_url",
    "ratio_digits_host",
    "shortest_words_raw",
    "longest_words_raw",
    "avg_words_raw",
    "tld_in_path",
    "abnormal_subdomain",
    "nb_subdomains",
    "prefix_suffix",
    "random_domain",
    "shortening_service",
    "path_extension",
    "nb_redirection",
    "ratio_extHyperlinks",
    "ratio_intErrors",
    // === Extended (20-24) ===
    "is_https",            // 20
    "has_ip",              // 21
    "num_query_params",    // 22
    "num_special",         // 23
    "suspicious_tld",      // 24
];

pub const TOP20_FEATURE_COUNT: usize = 20;
pub const EXTENDED_FEATURE_COUNT: usize = 25;

// ============================================================================
// SCHEMA
// ============================================================================

/// Named, versioned feature schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSchema {
    /// Layout v1 (20 features)
    Top20,
    /// Layout v2 (25 features)
    #[default]
    Extended,
}

impl FeatureSchema {
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            FeatureSchema::Top20 => TOP20_LAYOUT,
            FeatureSchema::Extended => EXTENDED_LAYOUT,
        }
    }

    pub fn version(&self) -> u8 {
        match self {
            FeatureSchema::Top20 => 1,
            FeatureSchema::Extended => 2,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.names().len()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureSchema::Top20 => "top20",
            FeatureSchema::Extended => "extended",
        }
    }

    /// CRC32 of the layout, used to detect mismatches at runtime
    pub fn layout_hash(&self) -> u32 {
        compute_layout_hash(self.version(), self.names())
    }
}

impl std::fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unknown schema name in configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSchemaError(pub String);

impl std::fmt::Display for UnknownSchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown feature schema '{}'. Use top20 or extended.", self.0)
    }
}

impl std::error::Error for UnknownSchemaError {}

impl FromStr for FeatureSchema {
    type Err = UnknownSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top20" | "v1" | "20" => Ok(FeatureSchema::Top20),
            "extended" | "v2" | "25" => Ok(FeatureSchema::Extended),
            _ => Err(UnknownSchemaError(s.to_string())),
        }
    }
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of a feature layout
pub fn compute_layout_hash(version: u8, names: &[&str]) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub schema: FeatureSchema,
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn for_schema(schema: FeatureSchema) -> Self {
        Self {
            schema,
            version: schema.version(),
            hash: schema.layout_hash(),
            feature_count: schema.feature_count(),
            feature_names: schema.names().iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(schema: FeatureSchema, name: &str) -> Option<usize> {
    schema.names().iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
