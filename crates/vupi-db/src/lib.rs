//! Vupi Database Library
//!
//! Relational store access for submitted questions, plus the embedded
//! schema migrations.

pub mod db;

pub use db::{with_transaction, QuestionRepository, QuestionStore};

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
