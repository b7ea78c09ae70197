//! Usage document served at `/`

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Phishing Website Detection API",
        "usage": "Send POST request to /predict with {'url': 'https://example.com'}; add ?model=lr|rf|dt for a single model",
        "example_request": {"url": "https://paypal-login-secure-update.com/account"},
        "example_response": {
            "url": "https://paypal-login-secure-update.com/account",
            "results": [
                {"model": "logistic_regression", "prediction": "Legitimate", "raw_label": 0, "probability_phishing": 0.4},
                {"model": "random_forest", "prediction": "Phishing", "raw_label": 1, "probability_phishing": 0.85},
                {"model": "decision_tree", "prediction": "Phishing", "raw_label": 1, "probability_phishing": 1.0}
            ]
        }
    }))
}

pub async fn not_found() -> crate::AppError {
    crate::AppError::NotFound("Resource not found".to_string())
}
