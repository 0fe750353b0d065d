//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

const READINESS_TIMEOUT: Duration = Duration::from_secs(5);

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the relational store answers.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status_code, status, database) =
        match tokio::time::timeout(READINESS_TIMEOUT, state.questions.health_check()).await {
            Ok(Ok(())) => (StatusCode::OK, "ready", "ready".to_string()),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Database readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "not_ready",
                    format!("not_ready: {}", e),
                )
            }
            Err(_) => {
                tracing::error!("Database readiness check timed out");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "not_ready",
                    "timeout".to_string(),
                )
            }
        };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "database": database,
        })),
    )
}
