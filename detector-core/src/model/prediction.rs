//! Prediction Types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// MODEL IDENTIFIERS
// ============================================================================

/// Classifiers the service knows how to serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    LogisticRegression,
    RandomForest,
    DecisionTree,
}

impl ModelId {
    /// Serving order for multi-model responses
    pub const ALL: [ModelId; 3] = [
        ModelId::LogisticRegression,
        ModelId::RandomForest,
        ModelId::DecisionTree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::LogisticRegression => "logistic_regression",
            ModelId::RandomForest => "random_forest",
            ModelId::DecisionTree => "decision_tree",
        }
    }

    /// Short request key
    pub fn key(&self) -> &'static str {
        match self {
            ModelId::LogisticRegression => "lr",
            ModelId::RandomForest => "rf",
            ModelId::DecisionTree => "dt",
        }
    }

    /// `lr` / `rf` / `dt`, case-insensitive
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "lr" => Some(ModelId::LogisticRegression),
            "rf" => Some(ModelId::RandomForest),
            "dt" => Some(ModelId::DecisionTree),
            _ => None,
        }
    }

    /// Default artifact file name
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = String;

    /// Accepts either the short key or the full identifier
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = ModelId::from_key(s) {
            return Ok(id);
        }
        ModelId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown model '{}'", s))
    }
}

// ============================================================================
// LABELS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Phishing,
    Legitimate,
}

impl Label {
    pub fn from_raw(raw: u8) -> Self {
        if raw == 1 {
            Label::Phishing
        } else {
            Label::Legitimate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "Phishing",
            Label::Legitimate => "Legitimate",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Per-request, per-model prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub model: ModelId,
    pub prediction: Label,
    pub raw_label: u8,
    pub probability_phishing: Option<f64>,
}

impl PredictionResult {
    pub fn new(model: ModelId, raw_label: u8, probability: Option<f64>) -> Self {
        Self {
            model,
            prediction: Label::from_raw(raw_label),
            raw_label,
            probability_phishing: probability.map(round_probability),
        }
    }

    pub fn is_phishing(&self) -> bool {
        self.prediction == Label::Phishing
    }
}

/// Clamp to [0, 1] and round to 3 decimals
pub fn round_probability(p: f64) -> f64 {
    if !p.is_finite() {
        return 0.0;
    }
    (p.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}
