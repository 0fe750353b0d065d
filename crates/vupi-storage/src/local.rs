use crate::keys::validate_object_name;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{name}` and are served from
/// `{base_url}/{bucket}/{name}`.
#[derive(Clone)]
pub struct LocalStorage {
    bucket_path: PathBuf,
    base_url: String,
    bucket: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/vupi/storage")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:8000/files")
    /// * `bucket` - Subdirectory acting as the bucket
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        bucket: String,
    ) -> StorageResult<Self> {
        let bucket_path = base_path.into().join(&bucket);

        fs::create_dir_all(&bucket_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                bucket_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            bucket_path,
            base_url,
            bucket,
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        object_name: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        validate_object_name(object_name)?;

        let path = self.bucket_path.join(object_name);
        let size = data.len();
        let start = std::time::Instant::now();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            object = %object_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn public_url(&self, object_name: &str) -> StorageResult<String> {
        validate_object_name(object_name)?;
        Ok(format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            object_name
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
