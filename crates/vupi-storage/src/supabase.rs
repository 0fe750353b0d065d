use crate::keys::validate_object_name;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Supabase Storage implementation (REST API)
///
/// Uploads go to `POST {project_url}/storage/v1/object/{bucket}/{name}` and
/// public URLs take the form `{project_url}/storage/v1/object/public/{bucket}/{name}`,
/// which resolves for buckets marked public.
#[derive(Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    project_url: String,
    bucket: String,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `project_url` - Supabase project URL (e.g., "https://abc.supabase.co")
    /// * `api_key` - Service or anon key, sent as bearer token and `apikey` header
    /// * `bucket` - Target bucket name
    pub fn new(project_url: String, api_key: &str, bucket: String) -> StorageResult<Self> {
        let project_url = project_url.trim_end_matches('/').to_string();
        if !(project_url.starts_with("http://") || project_url.starts_with("https://")) {
            return Err(StorageError::ConfigError(format!(
                "SUPABASE_URL must be an http(s) URL, got '{}'",
                project_url
            )));
        }

        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| StorageError::ConfigError(format!("Invalid SUPABASE_KEY: {}", e)))?;
        bearer.set_sensitive(true);
        let mut apikey = HeaderValue::from_str(api_key)
            .map_err(|e| StorageError::ConfigError(format!("Invalid SUPABASE_KEY: {}", e)))?;
        apikey.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("apikey", apikey);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(SupabaseStorage {
            client,
            project_url,
            bucket,
        })
    }

    fn encoded_path(&self, object_name: &str) -> String {
        object_name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn upload_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.project_url,
            self.bucket,
            self.encoded_path(object_name)
        )
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<()> {
        validate_object_name(object_name)?;

        let size = data.len() as u64;
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.upload_url(object_name))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    object = %object_name,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Supabase upload request failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                bucket = %self.bucket,
                object = %object_name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Supabase upload rejected"
            );
            return Err(StorageError::UploadFailed(format!(
                "storage responded {}: {}",
                status, body
            )));
        }

        tracing::info!(
            bucket = %self.bucket,
            object = %object_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Supabase upload successful"
        );

        Ok(())
    }

    fn public_url(&self, object_name: &str) -> StorageResult<String> {
        validate_object_name(object_name)?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.project_url,
            self.bucket,
            self.encoded_path(object_name)
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}
