//! Item processing
//!
//! Turns submitted content items into their persisted form. Image items are
//! base64-decoded, uploaded one at a time in input order and replaced by the
//! public URL of the stored object; every other item is carried over as-is.
//!
//! A failure aborts the whole submission. Objects uploaded before the failing
//! item stay in the bucket.

use base64::{
    alphabet,
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use vupi_core::models::{ContentItem, ItemKind, ProcessedItem};
use vupi_core::AppError;
use vupi_storage::Storage;

/// Content type sent with every uploaded image.
pub const IMAGE_CONTENT_TYPE: &str = "image/png";

/// Standard alphabet with canonical padding. Non-zero bits in the final
/// symbol are dropped instead of rejected.
const IMAGE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Object name for the `n`-th image (1-based) of a question.
pub fn image_object_name(question_id: Uuid, n: usize) -> String {
    format!("{}_{}.png", question_id, n)
}

/// Decode an image item's base64 payload.
///
/// ASCII whitespace is ignored so wrapped encoder output (MIME line breaks)
/// is accepted, as are leftover bits in the last symbol. Any other character
/// outside the standard alphabet, or bad padding, is a decode error.
pub fn decode_image(value: &str) -> Result<Vec<u8>, AppError> {
    let compact: Vec<u8> = value
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    IMAGE_ENGINE
        .decode(compact)
        .map_err(|e| AppError::Decode(e.to_string()))
}

#[derive(Clone)]
pub struct ItemProcessor {
    storage: Arc<dyn Storage>,
    upload_timeout: Duration,
}

impl ItemProcessor {
    pub fn new(storage: Arc<dyn Storage>, upload_timeout: Duration) -> Self {
        Self {
            storage,
            upload_timeout,
        }
    }

    /// Process items in order, returning one output item per input item.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub async fn process(
        &self,
        items: Vec<ContentItem>,
        question_id: Uuid,
    ) -> Result<Vec<ProcessedItem>, AppError> {
        let mut processed = Vec::with_capacity(items.len());
        let mut image_count = 0usize;

        for item in items {
            match item.kind() {
                ItemKind::Passthrough => processed.push(ProcessedItem::passthrough(item)),
                ItemKind::Image => {
                    image_count += 1;
                    let data = decode_image(&item.value)?;
                    let object_name = image_object_name(question_id, image_count);
                    let url = self.upload(&object_name, data).await?;
                    processed.push(ProcessedItem::uploaded(item, url));
                }
            }
        }

        tracing::debug!(images = image_count, "Items processed");
        Ok(processed)
    }

    async fn upload(&self, object_name: &str, data: Vec<u8>) -> Result<String, AppError> {
        let size = data.len();
        let upload = self.storage.upload(object_name, IMAGE_CONTENT_TYPE, data);

        match tokio::time::timeout(self.upload_timeout, upload).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(AppError::Upload(e.to_string())),
            Err(_) => {
                return Err(AppError::Upload(format!(
                    "upload of {} timed out after {}s",
                    object_name,
                    self.upload_timeout.as_secs()
                )))
            }
        }

        let url = self
            .storage
            .public_url(object_name)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        tracing::debug!(
            object = %object_name,
            bucket = %self.storage.bucket(),
            size_bytes = size,
            "Image stored"
        );

        Ok(url)
    }
}
