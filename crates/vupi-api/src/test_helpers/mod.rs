//! Test helpers (only available in test mode)

pub mod mock_question_store;
pub mod mock_storage;

pub use mock_question_store::MockQuestionStore;
pub use mock_storage::{MockStorage, RecordedUpload};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use vupi_core::models::{ContentItem, Filter};

pub fn text_item(id: i64, value: &str) -> ContentItem {
    ContentItem {
        id,
        value: value.to_string(),
        item_type: "text".to_string(),
    }
}

pub fn image_item(id: i64, data: &[u8]) -> ContentItem {
    ContentItem {
        id,
        value: STANDARD.encode(data),
        item_type: "image".to_string(),
    }
}

pub fn sample_filter() -> Filter {
    Filter {
        materia: vec!["math".to_string()],
        assunto: vec!["algebra".to_string()],
        sub_assunto: vec![],
        faculdade: "X".to_string(),
        ano: "2024".to_string(),
    }
}
