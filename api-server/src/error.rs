//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use phishguard_core::PredictError;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    // Model errors
    #[error("{0}")]
    ModelUnavailable(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::PredictionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::debug!("Rejected request: {}", message);
        }

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::ModelUnavailable { .. } => AppError::ModelUnavailable(err.to_string()),
            other => AppError::PredictionFailed(other.to_string()),
        }
    }
}
