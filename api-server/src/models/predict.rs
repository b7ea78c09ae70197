//! Prediction request/response models

use phishguard_core::{Label, ModelId, PredictionResult};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const MISSING_URL: &str = "Missing 'url' field in JSON payload";

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(required, length(min = 1))]
    pub url: Option<String>,
}

impl PredictRequest {
    /// Anything that is not a JSON object with a string `url` reads as empty
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// The validated URL, or `None` when it is missing or empty
    pub fn into_url(self) -> Option<String> {
        match self.validate() {
            Ok(()) => self.url,
            Err(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictQuery {
    pub model: Option<String>,
}

impl PredictQuery {
    /// `?model=` with an empty value counts as absent
    pub fn requested_model(&self) -> Option<&str> {
        self.model.as_deref().filter(|m| !m.is_empty())
    }
}

/// `?model=<key>` response
#[derive(Debug, Serialize)]
pub struct SinglePredictionResponse {
    pub url: String,
    pub model: ModelId,
    pub prediction: Label,
    pub raw_label: u8,
    pub confidence: Option<f64>,
}

impl SinglePredictionResponse {
    pub fn new(url: String, result: PredictionResult) -> Self {
        Self {
            url,
            model: result.model,
            prediction: result.prediction,
            raw_label: result.raw_label,
            confidence: result.probability_phishing,
        }
    }
}

/// Every available model
#[derive(Debug, Serialize)]
pub struct AllPredictionsResponse {
    pub url: String,
    pub results: Vec<PredictionResult>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Single(SinglePredictionResponse),
    All(AllPredictionsResponse),
}
