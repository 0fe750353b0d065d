//! Question repository: inserts into the `questions` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vupi_core::models::{NewQuestion, ProcessedItem, QuestionRecord};
use vupi_core::AppError;

use super::transaction::with_transaction;

/// Relational store for submitted questions
///
/// Implemented by [`QuestionRepository`] for Postgres; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Insert one question atomically and return the stored row.
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionRecord, AppError>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Row type for questions table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i32,
    pub question_id: Uuid,
    pub materia: Vec<String>,
    pub assunto: Vec<String>,
    pub sub_assunto: Vec<String>,
    pub faculdade: String,
    pub ano: String,
    pub data: Json<Vec<ProcessedItem>>,
    pub created_at: DateTime<Utc>,
}

impl From<QuestionRow> for QuestionRecord {
    fn from(row: QuestionRow) -> Self {
        QuestionRecord {
            id: row.id,
            question_id: row.question_id,
            materia: row.materia,
            assunto: row.assunto,
            sub_assunto: row.sub_assunto,
            faculdade: row.faculdade,
            ano: row.ano,
            data: row.data.0,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed question repository.
#[derive(Clone)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuestionStore for QuestionRepository {
    #[tracing::instrument(
        skip(self, question),
        fields(db.table = "questions", question_id = %question.question_id, items = question.data.len())
    )]
    async fn insert(&self, question: &NewQuestion) -> Result<QuestionRecord, AppError> {
        let question = question.clone();

        let row = with_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                sqlx::query_as::<Postgres, QuestionRow>(
                    r#"
                    INSERT INTO questions (question_id, materia, assunto, sub_assunto, faculdade, ano, data)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING id, question_id, materia, assunto, sub_assunto, faculdade, ano, data, created_at
                    "#,
                )
                .bind(question.question_id)
                .bind(&question.materia)
                .bind(&question.assunto)
                .bind(&question.sub_assunto)
                .bind(&question.faculdade)
                .bind(&question.ano)
                .bind(Json(&question.data))
                .fetch_one(&mut **tx)
                .await
            })
        })
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(db.table = "questions"))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
