//! Application state shared by all handlers.

use std::sync::Arc;
use std::time::Duration;
use vupi_core::Config;
use vupi_db::QuestionStore;
use vupi_storage::Storage;

use crate::services::{ItemProcessor, SubmissionService};

#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionService,
    /// Kept separately for readiness checks
    pub questions: Arc<dyn QuestionStore>,
}

impl AppState {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        questions: Arc<dyn QuestionStore>,
    ) -> Self {
        let items = ItemProcessor::new(
            storage,
            Duration::from_secs(config.storage_timeout_secs()),
        );

        Self {
            submissions: SubmissionService::new(items, questions.clone()),
            questions,
        }
    }
}
