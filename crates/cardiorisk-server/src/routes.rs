//! HTTP routes and handlers

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Uri,
    response::IntoResponse,
    Json,
};
use cardiorisk_core::{Error, PredictionResult};
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Status line returned by the liveness route
pub const ROOT_STATUS: &str = "API de Previsão Cardíaca está ativa. Use /predict com método POST.";

/// Liveness check; independent of the model state
pub async fn root() -> impl IntoResponse {
    Json(json!({ "status": ROOT_STATUS }))
}

/// Liveness plus the provider state
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let provider = state.service.provider();

    let mut body = json!({
        "status": "ok",
        "model": provider.state(),
        "classifier": provider.classifier().name(),
        "artifact": provider.artifact_path().display().to_string(),
    });
    if let Some(reason) = provider.degraded_reason() {
        body["reason"] = json!(reason);
    }

    Json(body)
}

/// Prometheus exposition
pub async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Predict cardiac-disease risk for one patient.
///
/// The body is taken raw so that malformed JSON ends up in the same error
/// envelope as every other failure.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    metrics::counter!("cardiorisk_requests_total").increment(1);

    let body = body.map_err(|e| record_error(Error::validation(e.body_text())))?;

    let start = Instant::now();
    let outcome = state.service.predict_json(&body);
    let latency_us = start.elapsed().as_micros() as u64;
    metrics::histogram!("cardiorisk_inference_latency_us").record(latency_us as f64);

    match outcome {
        Ok(result) => {
            let label = if result.is_positive() { "positive" } else { "negative" };
            metrics::counter!("cardiorisk_predictions_total", "outcome" => label).increment(1);
            info!(
                label = result.label,
                probability = result.probability_pct,
                latency_us,
                "Prediction served"
            );
            Ok(Json(result))
        }
        Err(e) => Err(record_error(e)),
    }
}

fn record_error(err: Error) -> ApiError {
    let kind = err.kind();
    metrics::counter!("cardiorisk_prediction_errors_total", "kind" => kind).increment(1);

    match &err {
        Error::ModelUnavailable(reason) => warn!("Prediction refused, model unavailable: {}", reason),
        _ => warn!(kind, "Prediction failed: {}", err),
    }

    ApiError::from(err)
}

/// Unknown routes
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
