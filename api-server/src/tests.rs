//! Route tests against a temporary artifact directory

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use phishguard_core::model::{Classifier, PredictionAdapter, StandardScaler};
use phishguard_core::{ArtifactConfig, ClassifierRegistry, FeatureSchema, ModelId, PredictError};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{create_router, AppState, Config};

const PHISHY: &str = "https://paypal-login-secure-update.com/account";
const LEGIT: &str = "https://www.apple.com/";

/// Decision stump on `prefix_suffix` (index 13)
fn stump() -> Value {
    json!({
        "n_features": 20,
        "children_left": [1, -1, -1],
        "children_right": [2, -1, -1],
        "feature": [13, -2, -2],
        "threshold": [0.5, -2.0, -2.0],
        "value": [[6.0, 4.0], [5.0, 0.0], [1.0, 4.0]]
    })
}

fn model_body(id: ModelId) -> Value {
    match id {
        ModelId::LogisticRegression => {
            let mut coef = vec![0.0; 20];
            coef[13] = 4.0;
            json!({"kind": "logistic_regression", "coef": coef, "intercept": -2.0})
        }
        ModelId::DecisionTree => {
            let mut tree = stump();
            tree["kind"] = json!("decision_tree");
            tree
        }
        ModelId::RandomForest => {
            let constant = json!({
                "n_features": 20,
                "children_left": [-1],
                "children_right": [-1],
                "feature": [-2],
                "threshold": [-2.0],
                "value": [[1.0, 1.0]]
            });
            json!({"kind": "random_forest", "n_features": 20, "estimators": [stump(), constant]})
        }
    }
}

/// Top-20 artifacts; every model keys on `prefix_suffix`
fn write_artifacts(dir: &Path, models: &[ModelId]) {
    let names: Vec<&str> = FeatureSchema::Top20.names().to_vec();
    fs::write(dir.join("features.json"), serde_json::to_vec(&names).unwrap()).unwrap();

    let scaler = StandardScaler::identity(names.len());
    fs::write(dir.join("scaler.json"), serde_json::to_vec(&scaler).unwrap()).unwrap();

    for &id in models {
        fs::write(dir.join(id.file_name()), model_body(id).to_string()).unwrap();
    }
}

fn app_with(dir: &Path) -> Router {
    let config = Config {
        artifact_dir: dir.to_path_buf(),
        ..Config::default()
    };
    let registry = ClassifierRegistry::load(&config.artifacts()).unwrap();
    create_router(AppState::new(registry, config))
}

fn app_with_models(models: &[ModelId]) -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), models);
    let app = app_with(dir.path());
    (dir, app)
}

fn test_app() -> (TempDir, Router) {
    app_with_models(&ModelId::ALL)
}

/// Always errors at prediction time
struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn kind(&self) -> &'static str {
        "failing"
    }

    fn n_features(&self) -> usize {
        20
    }

    fn predict(&self, _row: &[f64]) -> Result<u8, PredictError> {
        Err(PredictError::Model("classifier exploded".into()))
    }
}

fn failing_app() -> Router {
    let names: Vec<String> = FeatureSchema::Top20.names().iter().map(|s| s.to_string()).collect();
    let adapter = PredictionAdapter::new(names, StandardScaler::identity(20));
    let registry = ClassifierRegistry::new(FeatureSchema::Extended, adapter)
        .with_model(ModelId::LogisticRegression, Box::new(FailingClassifier))
        .unwrap()
        .with_model(ModelId::RandomForest, Box::new(FailingClassifier))
        .unwrap()
        .with_model(ModelId::DecisionTree, Box::new(FailingClassifier))
        .unwrap();
    create_router(AppState::new(registry, Config::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_predict(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_home_document() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["usage"].as_str().unwrap().contains("/predict"));
    assert_eq!(body["example_request"]["url"], PHISHY);
    assert_eq!(body["example_response"]["results"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    for payload in ["", "{not json", "{}", r#"{"url": ""}"#, "[1, 2]"] {
        let (_dir, app) = test_app();
        let (status, body) = send(app, post_predict("/predict", payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
        assert_eq!(body, json!({"error": "Missing 'url' field in JSON payload", "status": 400}));
    }
}

#[tokio::test]
async fn test_predict_all_models() {
    let (_dir, app) = test_app();
    let payload = json!({"url": PHISHY}).to_string();
    let (status, body) = send(app, post_predict("/predict", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], PHISHY);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0],
        json!({
            "model": "logistic_regression",
            "prediction": "Phishing",
            "raw_label": 1,
            "probability_phishing": 0.881
        })
    );
    assert_eq!(results[1]["model"], "random_forest");
    assert_eq!(results[1]["raw_label"], 1);
    assert_eq!(results[1]["probability_phishing"], 0.65);
    assert_eq!(results[2]["model"], "decision_tree");
    assert_eq!(results[2]["probability_phishing"], 0.8);
}

#[tokio::test]
async fn test_predict_all_with_missing_model_fails() {
    let (_dir, app) = app_with_models(&[ModelId::LogisticRegression, ModelId::DecisionTree]);
    let payload = json!({"url": PHISHY}).to_string();
    let (status, body) = send(app, post_predict("/predict", &payload)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Prediction failed: Model 'random_forest' not found! Choose from [\"logistic_regression\", \"decision_tree\"]",
            "status": 500
        })
    );
}

#[tokio::test]
async fn test_classifier_failure_is_500() {
    let payload = json!({"url": PHISHY}).to_string();

    let (status, body) = send(failing_app(), post_predict("/predict", &payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Prediction failed: classifier exploded", "status": 500}));

    let (status, body) = send(failing_app(), post_predict("/predict?model=rf", &payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Prediction failed: classifier exploded", "status": 500}));
}

#[tokio::test]
async fn test_malformed_query_is_json_bad_request() {
    let (_dir, app) = test_app();
    let payload = json!({"url": LEGIT}).to_string();
    let (status, body) = send(app, post_predict("/predict?model=lr&model=rf", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));
}

#[tokio::test]
async fn test_predict_single_model() {
    let (_dir, app) = test_app();
    let payload = json!({"url": LEGIT}).to_string();
    let (status, body) = send(app, post_predict("/predict?model=DT", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "url": LEGIT,
            "model": "decision_tree",
            "prediction": "Legitimate",
            "raw_label": 0,
            "confidence": 0.0
        })
    );
}

#[tokio::test]
async fn test_unknown_model_key() {
    let (_dir, app) = test_app();
    let payload = json!({"url": LEGIT}).to_string();
    let (status, body) = send(app, post_predict("/predict?model=svm", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown model key 'svm'. Use lr, rf or dt.");
}

#[tokio::test]
async fn test_unavailable_model_is_503() {
    let (_dir, app) = app_with_models(&[ModelId::LogisticRegression, ModelId::DecisionTree]);
    let payload = json!({"url": LEGIT}).to_string();
    let (status, body) = send(app, post_predict("/predict?model=rf", &payload)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);
    assert!(body["error"].as_str().unwrap().contains("random_forest"));
}

#[tokio::test]
async fn test_no_models_loaded() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), &[]);

    let payload = json!({"url": PHISHY}).to_string();
    let (status, body) = send(app_with(dir.path()), post_predict("/predict", &payload)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Prediction failed: Model 'logistic_regression'"));

    let (status, _) = send(app_with(dir.path()), post_predict("/predict?model=lr", &payload)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(app_with(dir.path()), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["models_loaded"], 0);
}

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["models_loaded"], 3);
    assert_eq!(body["feature_schema"], "extended");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_models_status_counts_inference() {
    let dir = tempfile::tempdir().unwrap();
    write_artifacts(dir.path(), &[ModelId::LogisticRegression, ModelId::DecisionTree]);
    let config = Config {
        artifact_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let registry = ClassifierRegistry::load(&ArtifactConfig::new(dir.path(), FeatureSchema::Extended)).unwrap();
    let app = create_router(AppState::new(registry, config));

    let payload = json!({"url": PHISHY}).to_string();
    let (status, _) = send(app.clone(), post_predict("/predict?model=lr", &payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(app, get("/models")).await;
    assert_eq!(status, StatusCode::OK);

    let models = body["models"].as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["id"], "logistic_regression");
    assert_eq!(models[0]["inference_count"], 1);
    assert_eq!(models[0]["kind"], "logistic_regression");
    assert_eq!(models[0]["checksum"].as_str().unwrap().len(), 64);
    assert_eq!(models[1]["available"], false);
    assert_eq!(models[2]["n_features"], 20);

    assert_eq!(body["layout"]["feature_count"], 25);
    assert_eq!(body["trained_features"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_dir, app) = test_app();
    let (status, body) = send(app, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}
