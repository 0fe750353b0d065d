//! In-memory QuestionStore for HTTP-level tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use vupi_core::models::{NewQuestion, QuestionRecord};
use vupi_core::AppError;
use vupi_db::QuestionStore;

#[derive(Clone, Default)]
pub struct InMemoryQuestionStore {
    records: Arc<Mutex<Vec<QuestionRecord>>>,
    failing: Arc<Mutex<bool>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make inserts and health checks fail from now on.
    pub fn set_failing(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn records(&self) -> Vec<QuestionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionRecord, AppError> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::Persistence(sqlx::Error::PoolTimedOut));
        }

        let mut records = self.records.lock().unwrap();
        let record = QuestionRecord {
            id: records.len() as i32 + 1,
            question_id: question.question_id,
            materia: question.materia.clone(),
            assunto: question.assunto.clone(),
            sub_assunto: question.sub_assunto.clone(),
            faculdade: question.faculdade.clone(),
            ano: question.ano.clone(),
            data: question.data.clone(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if *self.failing.lock().unwrap() {
            return Err(AppError::Persistence(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
