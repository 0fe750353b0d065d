//! Route configuration and setup.
//!
//! The submission endpoint lives in [handlers](crate::handlers); health checks in [health](health).

mod health;

use crate::api_doc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use vupi_core::Config;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let max_body_size = config.max_body_size_bytes();
    tracing::info!(
        max_body_mb = max_body_size / 1024 / 1024,
        "Request body limit enabled"
    );

    Router::new()
        .route("/questions", post(handlers::questions::submit_question))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc::get_openapi_spec())
}
