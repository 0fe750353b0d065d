//! Domain models for question submissions.

pub mod question;

pub use question::{
    ContentItem, Filter, ItemKind, NewQuestion, ProcessedItem, QuestionRecord, Submission,
    SubmissionResponse, SUBMISSION_CREATED_MESSAGE,
};
