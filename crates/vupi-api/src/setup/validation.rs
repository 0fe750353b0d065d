//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use vupi_core::{Config, StorageBackend};

/// Validate configuration, failing fast on values that would break requests
/// later and warning about ones that are merely unusual.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.storage_backend() == StorageBackend::Local {
        tracing::warn!(
            "Local storage backend in production - images are only as durable as this host's disk"
        );
    }

    let max_body_mb = config.max_body_size_bytes() / 1024 / 1024;
    if max_body_mb > 100 {
        tracing::warn!(
            max_body_mb,
            "MAX_BODY_SIZE_MB is very high - whole request bodies are buffered in memory"
        );
    }

    Ok(())
}
