//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use vupi_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vupi Questions API",
        version = "0.1.0",
        description = "Ingestion of exam questions. Image items are stored in an object store and referenced by URL."
    ),
    paths(handlers::questions::submit_question),
    components(schemas(
        models::Submission,
        models::ContentItem,
        models::Filter,
        models::ProcessedItem,
        models::SubmissionResponse,
        error::ErrorResponse,
    )),
    tags((name = "questions", description = "Question submission"))
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
