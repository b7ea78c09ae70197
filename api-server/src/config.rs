//! Configuration module

use phishguard_core::{ArtifactConfig, FeatureSchema};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Directory holding features.json, scaler.json and the model files
    pub artifact_dir: PathBuf,

    /// Layout the extractor produces for incoming URLs
    pub feature_schema: FeatureSchema,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            artifact_dir: PathBuf::from("models"),
            feature_schema: FeatureSchema::Extended,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let feature_schema = match env::var("FEATURE_SCHEMA") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, using {}", e, defaults.feature_schema);
                defaults.feature_schema
            }),
            Err(_) => defaults.feature_schema,
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            artifact_dir: env::var("ARTIFACT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.artifact_dir),

            feature_schema,

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    pub fn artifacts(&self) -> ArtifactConfig {
        ArtifactConfig::new(&self.artifact_dir, self.feature_schema)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
