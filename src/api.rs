/// HTTP API для модели калорий

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{PipelineError, PredictionError};
use crate::models::CaloriePipeline;
use crate::registry::ModelRegistry;
use crate::types::{BatchPredictionOutput, FeatureVector, ModelSummary, PredictionOutput, WorkoutSession};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

pub fn router(state: AppState) -> Router {
    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/model", get(model_info))
        .route("/api/predict", post(predict))
        .route("/api/predict/batch", post(predict_batch))
        .layer(cors)
        .with_state(state)
}

/// Ошибки уровня HTTP: сервер не падает, клиент получает сообщение
#[derive(Debug)]
pub enum ApiError {
    Model(PipelineError),
    Input(PredictionError),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        ApiError::Model(e)
    }
}

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        ApiError::Input(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Model(e) if e.is_data_source() => {
                tracing::error!("Model unavailable: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            ApiError::Model(e) => {
                tracing::error!("Model training failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::Input(e) => {
                tracing::warn!("Rejected prediction input: {}", e);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Error making prediction: {e}"),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn root() -> Json<Value> {
    Json(serde_json::json!({
        "message": "Calorie ML API (Rust)",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model_fitted": state.registry.is_fitted()
    }))
}

async fn pipeline(state: &AppState) -> Result<Arc<CaloriePipeline>, ApiError> {
    Ok(state.registry.get().await?)
}

async fn model_info(State(state): State<AppState>) -> Result<Json<ModelSummary>, ApiError> {
    let pipeline = pipeline(&state).await?;
    Ok(Json(pipeline.summary()))
}

async fn predict(
    State(state): State<AppState>,
    Json(session): Json<WorkoutSession>,
) -> Result<Json<PredictionOutput>, ApiError> {
    tracing::info!(
        "Predict request: {} h {}, {} x {}",
        session.session_duration_hours,
        session.workout_type,
        session.sets,
        session.reps
    );

    let pipeline = pipeline(&state).await?;
    Ok(Json(pipeline.predict_calories(&session)?))
}

async fn predict_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<Map<String, Value>>>,
) -> Result<Json<BatchPredictionOutput>, ApiError> {
    tracing::info!("Batch predict request: {} records", records.len());

    let rows = records
        .iter()
        .map(FeatureVector::from_columns)
        .collect::<Result<Vec<_>, _>>()?;

    let pipeline = pipeline(&state).await?;
    let predictions = pipeline.predict(&rows)?;
    Ok(Json(BatchPredictionOutput { predictions }))
}
