//! Prediction handler

use std::sync::Arc;

use axum::{extract::State, Json};
use severity_core::logic::model::Prediction;
use severity_core::logic::risk::AttributeRecord;

use crate::error::{AppError, AppResult};
use crate::models::PredictionRequest;
use crate::AppState;

pub async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> AppResult<Json<Prediction>> {
    let predictor = state.predictor.as_ref().map(Arc::clone).ok_or(AppError::ModelNotLoaded)?;
    let record = AttributeRecord::from(req);

    // Tree traversal is CPU-bound; keep it off the async workers
    let (record, result) = tokio::task::spawn_blocking(move || {
        let result = predictor.predict(&record);
        (record, result)
    })
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;
    let prediction = result?;

    tracing::debug!(
        "Predicted {} ({:.4}) for {} / {} / {}",
        prediction.prediction,
        prediction.confidence,
        record.weather,
        record.road_type,
        record.vehicle_type
    );

    Ok(Json(prediction))
}
