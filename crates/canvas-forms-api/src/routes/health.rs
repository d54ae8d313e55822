//! Liveness probe backed by a repository read

use crate::models::HealthResponse;
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::warn;

/// 200 while submissions can be counted, 503 otherwise
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, label, submissions) = match state.repository.count().await {
        Ok(count) => (StatusCode::OK, "healthy", Some(count)),
        Err(e) => {
            warn!(error = %e, "Submission repository unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", None)
        }
    };
    let body = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        submissions,
        checked_at: chrono::Utc::now(),
    };
    (status, Json(body))
}
