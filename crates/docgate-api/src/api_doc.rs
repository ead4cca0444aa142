//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docgate_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docgate API",
        version = "0.1.0",
        description = "Ingestion gate that validates the files of an ingestion job before downstream processing. Each file is classified as Supported or Unsupported by its name suffix against a configured extension allow-list, statuses are pushed to the ingestion-status service, and the per-file results are returned tagged with the job id. All endpoints are versioned under /api/v0/."
    ),
    paths(handlers::ingestion::handle_ingestion_event),
    components(schemas(
        models::IngestionEvent,
        models::EventDetail,
        models::IngestionInput,
        models::FileDescriptor,
        models::FileStatus,
        models::ValidatedFile,
        models::TaggedFile,
        models::TaggedResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "ingestion", description = "Ingestion event validation")
    )
)]
pub struct ApiDoc;
