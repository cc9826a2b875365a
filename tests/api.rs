mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use calorie_ml::{
    api::{router, AppState},
    ModelRegistry,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with_model() -> Router {
    let registry = ModelRegistry::with_pipeline("synthetic.csv", common::fitted_pipeline(120));
    router(AppState {
        registry: Arc::new(registry),
    })
}

fn app_without_data() -> Router {
    let registry = ModelRegistry::new("/nonexistent/expanded_fitness_data.csv");
    router(AppState {
        registry: Arc::new(registry),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn workout() -> Value {
    json!({
        "session_duration_hours": 1.0,
        "avg_bpm": 140.0,
        "max_bpm": 180.0,
        "resting_bpm": 70.0,
        "height_m": 1.75,
        "age": 30.0,
        "fat_percentage": 20.0,
        "experience_level": 3.0,
        "workout_frequency": 4.0,
        "sets": 3,
        "reps": 10,
        "workout_type": "HIIT"
    })
}

#[tokio::test]
async fn health_reports_model_state() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app_with_model(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_fitted"], true);
}

#[tokio::test]
async fn predict_returns_estimate_and_summary() {
    let (status, body) = send(app_with_model(), post_json("/api/predict", workout())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["calories_burned"].as_f64().unwrap() >= 0.0);
    assert_eq!(body["training_volume"], 30);
    assert_eq!(body["workout_type"], "HIIT");
}

#[tokio::test]
async fn overflowing_sets_times_reps_is_unprocessable() {
    let mut body = workout();
    body["sets"] = json!(i64::MAX);
    body["reps"] = json!(2);
    let (status, body) = send(app_with_model(), post_json("/api/predict", body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Training_Volume"));
}

#[tokio::test]
async fn model_info_exposes_fit_metrics() {
    let request = Request::builder().uri("/api/model").body(Body::empty()).unwrap();
    let (status, body) = send(app_with_model(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["n_samples"], 120);
    assert_eq!(body["features"].as_array().unwrap().len(), 11);
    assert_eq!(body["reference_category"], "Cardio");
}

#[tokio::test]
async fn batch_missing_field_is_unprocessable() {
    let records = json!([{
        "Session_Duration (hours)": 1.0,
        "Avg_BPM": 140.0,
        "Workout_Type": "Cardio"
    }]);
    let (status, body) = send(app_with_model(), post_json("/api/predict/batch", records)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Max_BPM"));
}

#[tokio::test]
async fn batch_predicts_every_record() {
    let record = json!({
        "Session_Duration (hours)": 1.0,
        "Avg_BPM": 140.0,
        "Max_BPM": 180.0,
        "Resting_BPM": 70.0,
        "Height (m)": 1.75,
        "Age": null,
        "Fat_Percentage": 20.0,
        "Experience_Level": 3.0,
        "Workout_Frequency (days/week)": 4.0,
        "Training_Volume": 30,
        "Workout_Type": "Pilates"
    });
    let (status, body) = send(
        app_with_model(),
        post_json("/api/predict/batch", json!([record.clone(), record])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0], predictions[1]);
}

#[tokio::test]
async fn missing_data_source_is_service_unavailable() {
    let (status, body) = send(app_without_data(), post_json("/api/predict", workout())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("data source unavailable"));
}
