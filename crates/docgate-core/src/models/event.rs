use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FileDescriptor;

/// Trigger event envelope delivered by the event bus.
///
/// Only `detail.ingestioninput` is required. The bus metadata fields
/// (`id`, `source`, `detail-type`, `time`) are accepted when present and
/// carried for logging; they play no role in classification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestionEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        rename = "detail-type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    pub detail: EventDetail,
}

/// The `detail` member of the envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetail {
    #[serde(rename = "ingestioninput")]
    pub ingestion_input: IngestionInput,
}

/// The ingestion request proper: the job id and the files to classify.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestionInput {
    #[serde(rename = "ingestionjobid")]
    pub ingestion_job_id: String,
    pub files: Vec<FileDescriptor>,
}
