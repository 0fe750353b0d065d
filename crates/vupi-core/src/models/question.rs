use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned with every accepted submission.
pub const SUBMISSION_CREATED_MESSAGE: &str = "Submission created successfully";

/// How a content item is handled during processing.
///
/// Derived from the caller's `type` string, compared case-insensitively.
/// The caller's string is always kept verbatim for the persisted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// `value` is base64-encoded binary that gets uploaded to the object store.
    Image,
    /// Any other type; `value` is stored untouched.
    Passthrough,
}

impl ItemKind {
    pub fn classify(item_type: &str) -> Self {
        if item_type.eq_ignore_ascii_case("image") {
            ItemKind::Image
        } else {
            ItemKind::Passthrough
        }
    }
}

/// One unit of submitted content, as sent by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContentItem {
    /// Caller-assigned identifier, preserved as-is
    pub id: i64,
    /// Text content, or base64 bytes for image items
    pub value: String,
    /// Content type; `"image"` (any casing) triggers an upload
    #[serde(rename = "type")]
    pub item_type: String,
}

impl ContentItem {
    pub fn kind(&self) -> ItemKind {
        ItemKind::classify(&self.item_type)
    }
}

/// One unit of content as persisted in `questions.data`.
///
/// For image items `value` holds the public URL of the uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProcessedItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub item_type: String,
    pub value: String,
}

impl ProcessedItem {
    /// Carry a non-image item over unchanged.
    pub fn passthrough(item: ContentItem) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            value: item.value,
        }
    }

    /// Replace an image item's payload with the URL of its stored object.
    pub fn uploaded(item: ContentItem, public_url: String) -> Self {
        Self {
            id: item.id,
            item_type: item.item_type,
            value: public_url,
        }
    }
}

/// Classification metadata attached to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Filter {
    pub materia: Vec<String>,
    pub assunto: Vec<String>,
    #[serde(rename = "subAssunto")]
    pub sub_assunto: Vec<String>,
    pub faculdade: String,
    pub ano: String,
}

/// Request body of `POST /questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub data: Vec<ContentItem>,
    pub filter: Filter,
}

/// A fully assembled question, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewQuestion {
    pub question_id: Uuid,
    pub materia: Vec<String>,
    pub assunto: Vec<String>,
    pub sub_assunto: Vec<String>,
    pub faculdade: String,
    pub ano: String,
    pub data: Vec<ProcessedItem>,
}

impl NewQuestion {
    /// Combine the filter fields, the question id and the processed items.
    pub fn assemble(question_id: Uuid, filter: Filter, data: Vec<ProcessedItem>) -> Self {
        Self {
            question_id,
            materia: filter.materia,
            assunto: filter.assunto,
            sub_assunto: filter.sub_assunto,
            faculdade: filter.faculdade,
            ano: filter.ano,
            data,
        }
    }
}

/// A persisted question row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionRecord {
    /// Store-assigned surrogate key
    pub id: i32,
    pub question_id: Uuid,
    pub materia: Vec<String>,
    pub assunto: Vec<String>,
    pub sub_assunto: Vec<String>,
    pub faculdade: String,
    pub ano: String,
    pub data: Vec<ProcessedItem>,
    pub created_at: DateTime<Utc>,
}

/// Success body of `POST /questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub message: String,
    pub submission_id: i32,
}

impl SubmissionResponse {
    pub fn created(submission_id: i32) -> Self {
        Self {
            message: SUBMISSION_CREATED_MESSAGE.to_string(),
            submission_id,
        }
    }
}
