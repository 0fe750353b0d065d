//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vupi_core::Config;
use vupi_storage::{create_storage, Storage};

/// Build the object store client for the configured backend and bucket
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;

    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %storage.bucket(),
        upload_timeout_secs = config.storage_timeout_secs(),
        "Storage initialized successfully"
    );

    Ok(storage)
}
