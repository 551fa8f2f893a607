//! Axum route handlers for the Metrics API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{check_text_size, AppError};
use crate::metrics::base::MetricsConfig;
use crate::metrics::service::{MetricsResult, ScoringRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub pairs: Vec<ScoringRequest>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<MetricsResult>,
}

fn validate(request: &ScoringRequest, max_bytes: usize) -> Result<(), AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }
    check_text_size("job_text", &request.job_text, max_bytes)?;
    check_text_size("resume_text", &request.resume_text, max_bytes)?;
    check_text_size("original_resume_text", request.original(), max_bytes)
}

/// POST /api/v1/metrics
///
/// Scores one (job, resume) pair. Scorer failures are reported inside the
/// result, never as an error response.
pub async fn handle_metrics(
    State(state): State<AppState>,
    Json(request): Json<ScoringRequest>,
) -> Result<Json<MetricsResult>, AppError> {
    validate(&request, state.config.max_text_bytes)?;

    Ok(Json(state.metrics.calculate(&request).await))
}

/// POST /api/v1/metrics/batch
///
/// Scores many pairs concurrently; results keep the request order.
pub async fn handle_metrics_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    if request.pairs.is_empty() {
        return Err(AppError::Validation("pairs cannot be empty".to_string()));
    }
    if request.pairs.len() > state.config.max_batch_pairs {
        return Err(AppError::PayloadTooLarge(format!(
            "{} pairs submitted; the limit is {}",
            request.pairs.len(),
            state.config.max_batch_pairs
        )));
    }
    for (i, pair) in request.pairs.iter().enumerate() {
        validate(pair, state.config.max_text_bytes).map_err(|e| match e {
            AppError::Validation(msg) => AppError::Validation(format!("pairs[{i}]: {msg}")),
            AppError::PayloadTooLarge(msg) => {
                AppError::PayloadTooLarge(format!("pairs[{i}]: {msg}"))
            }
        })?;
    }

    let results = state.metrics.calculate_batch(request.pairs).await;

    Ok(Json(BatchResponse { results }))
}

/// GET /api/v1/metrics/config
///
/// The thresholds and tunables applied when a request sets no `options`.
pub async fn handle_metrics_config(State(state): State<AppState>) -> Json<MetricsConfig> {
    Json(state.metrics.config().clone())
}
