//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    /// Hold-out accuracy from training metadata, or "unknown"
    test_accuracy: Value,
    model_loaded: bool,
    version: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let test_accuracy = state
        .meta
        .as_ref()
        .map(|meta| Value::from(meta.test_accuracy))
        .unwrap_or_else(|| Value::from("unknown"));

    Json(HealthResponse {
        status: "ok",
        test_accuracy,
        model_loaded: state.predictor.is_some(),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
