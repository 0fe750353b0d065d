//! Question submission handler

use axum::{extract::State, response::Json};
use std::sync::Arc;
use vupi_core::models::{Submission, SubmissionResponse};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Submit a question
///
/// Uploads every image item to the object store, then stores the question
/// with image values replaced by their public URLs.
#[utoipa::path(
    post,
    path = "/questions",
    request_body = Submission,
    responses(
        (status = 200, description = "Submission created successfully", body = SubmissionResponse),
        (status = 400, description = "Invalid body or undecodable image data", body = ErrorResponse),
        (status = 500, description = "Image upload or database insert failed", body = ErrorResponse)
    ),
    tag = "questions"
)]
#[tracing::instrument(skip_all)]
pub async fn submit_question(
    State(state): State<Arc<AppState>>,
    ValidatedJson(submission): ValidatedJson<Submission>,
) -> Result<Json<SubmissionResponse>, HttpAppError> {
    let response = state.submissions.handle(submission).await?;
    Ok(Json(response))
}
