use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use docgate_core::models::{IngestionEvent, JobStatusReport, TaggedResponse};
use docgate_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Validate the files of an ingestion job.
///
/// Classifies every file in the event by name suffix, pushes the per-file
/// statuses to the ingestion-status service, and returns the results tagged
/// with the job id. The job id doubles as the correlation id on the span,
/// the log lines, and the emitted counters.
#[utoipa::path(
    post,
    path = "/api/v0/ingestion/events",
    tag = "ingestion",
    summary = "Validate the files of an ingestion job",
    description = "Classifies each file as Supported or Unsupported by its name suffix, reports the statuses to the ingestion-status service, and returns the per-file results tagged with the job id. An empty file list yields isValid=false.",
    request_body = IngestionEvent,
    responses(
        (status = 200, description = "Per-file validation results", body = TaggedResponse),
        (status = 400, description = "Malformed event payload", body = ErrorResponse),
        (status = 502, description = "Status service rejected the report or was unreachable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, event), fields(
    correlation_id = tracing::field::Empty,
    file_count = tracing::field::Empty
))]
pub async fn handle_ingestion_event(
    State(state): State<Arc<AppState>>,
    ValidatedJson(event): ValidatedJson<IngestionEvent>,
) -> Result<impl IntoResponse, HttpAppError> {
    tracing::debug!(event = ?event, "Received ingestion event");

    let input = event.detail.ingestion_input;
    let job_id = input.ingestion_job_id;

    tracing::Span::current().record("correlation_id", job_id.as_str());
    tracing::Span::current().record("file_count", input.files.len());

    state.metrics.record_cold_start(&job_id);

    tracing::info!(
        correlation_id = %job_id,
        file_count = input.files.len(),
        "Validating ingestion job input"
    );

    let response = state.validator.classify(&input.files);
    let supported = response.supported_count();
    let unsupported = response.unsupported_count();

    state
        .metrics
        .record_classification(&job_id, supported, unsupported);

    // The status service receives every file's status, tagged or not, before
    // the response is returned. A failed delivery aborts the invocation.
    let report = JobStatusReport {
        job_id: job_id.clone(),
        files: response.files.clone(),
    };
    state
        .reporter
        .update_job_status(&report)
        .await
        .map_err(|source| AppError::StatusReport {
            message: format!("could not deliver file statuses for job {}", job_id),
            source,
        })?;

    let tagged = response.tag_with_job(&job_id);

    tracing::info!(
        correlation_id = %job_id,
        is_valid = tagged.is_valid,
        supported_files = supported,
        unsupported_files = unsupported,
        "Returning validation response"
    );
    tracing::debug!(response = ?tagged, "Validation response payload");

    Ok(Json(tagged))
}
