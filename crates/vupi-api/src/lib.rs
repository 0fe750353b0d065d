//! Vupi API Library
//!
//! This crate provides the HTTP handlers, the submission pipeline services and
//! application setup for the question ingestion service.

mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_helpers;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::{ItemProcessor, SubmissionService, SubmissionStage};
pub use state::AppState;
