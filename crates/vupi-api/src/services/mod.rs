//! Submission pipeline services

pub mod items;
pub mod submission;

pub use items::ItemProcessor;
pub use submission::{SubmissionService, SubmissionStage};
