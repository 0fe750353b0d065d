//! Mock QuestionStore implementation for testing

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use vupi_core::models::{NewQuestion, QuestionRecord};
use vupi_core::AppError;
use vupi_db::QuestionStore;

#[derive(Default)]
struct MockQuestionStoreState {
    records: Vec<QuestionRecord>,
    insert_attempts: usize,
    fail_inserts: bool,
    unhealthy: bool,
}

/// In-memory question store assigning sequential ids
#[derive(Clone, Default)]
pub struct MockQuestionStore {
    state: Arc<Mutex<MockQuestionStoreState>>,
}

impl MockQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail as a database error would.
    pub fn fail_inserts(&self) {
        self.state.lock().unwrap().fail_inserts = true;
    }

    pub fn set_unhealthy(&self) {
        self.state.lock().unwrap().unhealthy = true;
    }

    pub fn records(&self) -> Vec<QuestionRecord> {
        self.state.lock().unwrap().records.clone()
    }

    pub fn insert_attempts(&self) -> usize {
        self.state.lock().unwrap().insert_attempts
    }
}

#[async_trait]
impl QuestionStore for MockQuestionStore {
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionRecord, AppError> {
        let mut state = self.state.lock().unwrap();
        state.insert_attempts += 1;
        if state.fail_inserts {
            return Err(AppError::Persistence(sqlx::Error::PoolTimedOut));
        }

        let record = QuestionRecord {
            id: state.records.len() as i32 + 1,
            question_id: question.question_id,
            materia: question.materia.clone(),
            assunto: question.assunto.clone(),
            sub_assunto: question.sub_assunto.clone(),
            faculdade: question.faculdade.clone(),
            ano: question.ano.clone(),
            data: question.data.clone(),
            created_at: Utc::now(),
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if self.state.lock().unwrap().unhealthy {
            return Err(AppError::Persistence(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}
