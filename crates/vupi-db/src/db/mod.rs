//! Database repositories for data access layer
//
// Question repository and the store trait the API depends on
pub mod question;
//
// Transaction utilities
pub mod transaction;

pub use question::{QuestionRepository, QuestionStore};
pub use transaction::with_transaction;
