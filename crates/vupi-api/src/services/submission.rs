//! Submission handling
//!
//! Drives one submission through its stages: a fresh question id is minted,
//! the items are processed, the record is assembled and inserted in a single
//! transaction. Nothing is written to the database unless every item was
//! processed.

use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use vupi_core::models::{NewQuestion, Submission, SubmissionResponse};
use vupi_core::AppError;
use vupi_db::QuestionStore;

use super::items::ItemProcessor;

/// Lifecycle of one submission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Received,
    Validated,
    ItemsProcessed,
    Assembled,
    Persisted,
    Responded,
}

impl SubmissionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStage::Received => "received",
            SubmissionStage::Validated => "validated",
            SubmissionStage::ItemsProcessed => "items_processed",
            SubmissionStage::Assembled => "assembled",
            SubmissionStage::Persisted => "persisted",
            SubmissionStage::Responded => "responded",
        }
    }
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct SubmissionService {
    items: ItemProcessor,
    store: Arc<dyn QuestionStore>,
}

impl SubmissionService {
    pub fn new(items: ItemProcessor, store: Arc<dyn QuestionStore>) -> Self {
        Self { items, store }
    }

    /// Persist one already-validated submission and return its receipt.
    #[tracing::instrument(skip(self, submission), fields(items = submission.data.len()))]
    pub async fn handle(&self, submission: Submission) -> Result<SubmissionResponse, AppError> {
        enter(SubmissionStage::Received);
        enter(SubmissionStage::Validated);

        let question_id = Uuid::new_v4();
        let Submission { data, filter } = submission;

        let processed = self
            .items
            .process(data, question_id)
            .await
            .map_err(|e| failed(SubmissionStage::ItemsProcessed, question_id, e))?;
        enter(SubmissionStage::ItemsProcessed);

        let question = NewQuestion::assemble(question_id, filter, processed);
        enter(SubmissionStage::Assembled);

        let record = self
            .store
            .insert(&question)
            .await
            .map_err(|e| failed(SubmissionStage::Persisted, question_id, e))?;
        enter(SubmissionStage::Persisted);

        tracing::info!(
            submission_id = record.id,
            question_id = %record.question_id,
            materia = ?record.materia,
            assunto = ?record.assunto,
            sub_assunto = ?record.sub_assunto,
            faculdade = %record.faculdade,
            ano = %record.ano,
            items = record.data.len(),
            created_at = %record.created_at,
            "Question inserted"
        );

        let response = SubmissionResponse::created(record.id);
        enter(SubmissionStage::Responded);
        Ok(response)
    }
}

fn enter(stage: SubmissionStage) {
    tracing::debug!(stage = %stage, "Submission stage reached");
}

/// Log a failure to reach `stage` and hand the error back.
fn failed(stage: SubmissionStage, question_id: Uuid, error: AppError) -> AppError {
    tracing::warn!(
        failed_stage = %stage,
        question_id = %question_id,
        error_type = error.error_type(),
        error = %error,
        "Submission aborted"
    );
    error
}
