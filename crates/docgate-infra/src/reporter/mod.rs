//! Delivery of per-file validation statuses to the ingestion-status service.
//!
//! The handler reports every file's status exactly once per invocation and
//! treats a failed delivery as fatal for that invocation. Retry and
//! buffering are deliberately absent; the upstream pipeline re-emits the
//! event if it wants another attempt.

mod http;

pub use http::{HttpStatusReporter, StatusReporterConfig};

use async_trait::async_trait;
use docgate_core::models::JobStatusReport;

/// Sink for job status reports.
#[async_trait]
pub trait StatusReporter: Send + Sync {
    /// Push the statuses of all files in a job to the status service.
    async fn update_job_status(&self, report: &JobStatusReport) -> anyhow::Result<()>;
}
