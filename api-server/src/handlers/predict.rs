//! URL prediction handler

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use phishguard_core::{FeatureRecord, ModelId};

use crate::models::{
    AllPredictionsResponse, PredictQuery, PredictRequest, PredictResponse,
    SinglePredictionResponse, MISSING_URL,
};
use crate::{AppError, AppResult, AppState};

/// Classify a URL with one model (`?model=lr|rf|dt`) or all three
pub async fn predict(
    State(state): State<AppState>,
    query: Result<Query<PredictQuery>, QueryRejection>,
    body: Bytes,
) -> AppResult<Json<PredictResponse>> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let url = PredictRequest::from_body(&body)
        .into_url()
        .ok_or_else(|| AppError::BadRequest(MISSING_URL.to_string()))?;

    let requested = match query.requested_model() {
        Some(key) => Some(ModelId::from_key(key).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown model key '{}'. Use lr, rf or dt.", key))
        })?),
        None => None,
    };

    let vector = state.extractor.extract(&url);
    let record = FeatureRecord::from(&vector);
    tracing::debug!(url = %url, features = %vector.to_log_entry(), "Extracted features");

    let response = match requested {
        Some(id) => {
            let result = state.registry.predict(id, &record)?;
            tracing::info!(url = %url, model = %id, prediction = %result.prediction, "Prediction");
            PredictResponse::Single(SinglePredictionResponse::new(url, result))
        }
        None => {
            // Every model must answer; a missing one fails the whole request
            let results = state
                .registry
                .predict_all(&record)
                .map_err(|e| AppError::PredictionFailed(e.to_string()))?;
            let phishing = results.iter().filter(|r| r.is_phishing()).count();
            tracing::info!(url = %url, phishing, models = results.len(), "Prediction");
            PredictResponse::All(AllPredictionsResponse { url, results })
        }
    };

    Ok(Json(response))
}
