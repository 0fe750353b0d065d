//! Mock Storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vupi_storage::{Storage, StorageBackend, StorageError, StorageResult};

/// One call to [`Storage::upload`] as seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Default)]
struct MockStorageState {
    uploads: Vec<RecordedUpload>,
    failure: Option<String>,
    succeed_first: usize,
    url_failure: Option<String>,
    delay: Option<Duration>,
}

/// Mock storage implementation that records uploads in memory
#[derive(Clone, Default)]
pub struct MockStorage {
    state: Arc<Mutex<MockStorageState>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail with `message`.
    pub fn fail_uploads(&self, message: &str) {
        self.fail_after(0, message);
    }

    /// Let the next `n` uploads succeed, then fail every later one with `message`.
    pub fn fail_after(&self, n: usize, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.failure = Some(message.to_string());
        state.succeed_first = state.uploads.len() + n;
    }

    /// Make public URL resolution fail with `message`.
    pub fn fail_public_urls(&self, message: &str) {
        self.state.lock().unwrap().url_failure = Some(message.to_string());
    }

    /// Sleep before completing each upload.
    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn url_for(&self, object_name: &str) -> String {
        format!("https://storage.test/questions/{}", object_name)
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        let (failure, delay) = {
            let state = self.state.lock().unwrap();
            let failure = state
                .failure
                .clone()
                .filter(|_| state.uploads.len() >= state.succeed_first);
            (failure, state.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = failure {
            return Err(StorageError::UploadFailed(message));
        }

        self.state.lock().unwrap().uploads.push(RecordedUpload {
            name: object_name.to_string(),
            content_type: content_type.to_string(),
            data,
        });
        Ok(())
    }

    fn public_url(&self, object_name: &str) -> StorageResult<String> {
        if let Some(message) = self.state.lock().unwrap().url_failure.clone() {
            return Err(StorageError::ConfigError(message));
        }
        Ok(self.url_for(object_name))
    }

    fn bucket(&self) -> &str {
        "questions"
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
