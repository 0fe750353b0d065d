//! Application setup and initialization
//!
//! Builds every collaborator once at startup and wires them into the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vupi_core::Config;
use vupi_db::{QuestionRepository, QuestionStore};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Initialize telemetry first so validation warnings are visible
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let questions: Arc<dyn QuestionStore> = Arc::new(QuestionRepository::new(pool));
    let state = Arc::new(AppState::new(&config, storage, questions));

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
