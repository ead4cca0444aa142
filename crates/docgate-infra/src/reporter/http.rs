use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use docgate_core::models::JobStatusReport;

use super::StatusReporter;

/// Connection settings for the ingestion-status endpoint.
#[derive(Debug, Clone)]
pub struct StatusReporterConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

/// Reports job statuses over HTTP with a single POST per job.
pub struct HttpStatusReporter {
    http_client: reqwest::Client,
    config: StatusReporterConfig,
}

impl HttpStatusReporter {
    pub fn new(config: StatusReporterConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for status reporter")?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl StatusReporter for HttpStatusReporter {
    #[tracing::instrument(
        skip(self, report),
        fields(job_id = %report.job_id, file_count = report.files.len())
    )]
    async fn update_job_status(&self, report: &JobStatusReport) -> anyhow::Result<()> {
        let mut request = self
            .http_client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", "Docgate-Reporter/1.0")
            .json(report);

        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request
            .send()
            .await
            .context("Failed to reach ingestion-status service")?;

        let status_code = response.status().as_u16();

        if (200..300).contains(&status_code) {
            tracing::debug!(status = status_code, "Job status update accepted");
            Ok(())
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            tracing::warn!(
                status = status_code,
                error_body = %error_body,
                "Ingestion-status service rejected the report"
            );

            anyhow::bail!(
                "Ingestion-status service returned {}: {}",
                status_code,
                error_body
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use docgate_core::models::{FileStatus, ValidatedFile};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct TestState {
        response_status: StatusCode,
        bodies: Arc<Mutex<Vec<serde_json::Value>>>,
        headers: Arc<Mutex<Vec<HeaderMap>>>,
    }

    async fn record_report(
        State(state): State<TestState>,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        state.bodies.lock().unwrap().push(body);
        state.headers.lock().unwrap().push(headers);
        state.response_status
    }

    async fn spawn_status_server(response_status: StatusCode) -> (String, TestState) {
        let state = TestState {
            response_status,
            bodies: Arc::new(Mutex::new(Vec::new())),
            headers: Arc::new(Mutex::new(Vec::new())),
        };

        let app = Router::new()
            .route("/status", post(record_report))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/status", addr), state)
    }

    fn reporter_for(endpoint: String, api_key: Option<&str>) -> HttpStatusReporter {
        HttpStatusReporter::new(StatusReporterConfig {
            endpoint,
            api_key: api_key.map(|k| k.to_string()),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    fn sample_report() -> JobStatusReport {
        JobStatusReport {
            job_id: "job-123".to_string(),
            files: vec![
                ValidatedFile {
                    status: FileStatus::Supported,
                    name: "a.pdf".to_string(),
                },
                ValidatedFile {
                    status: FileStatus::Unsupported,
                    name: "c.docx".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_update_job_status_posts_report() {
        let (endpoint, state) = spawn_status_server(StatusCode::OK).await;
        let reporter = reporter_for(endpoint, None);

        reporter.update_job_status(&sample_report()).await.unwrap();

        let bodies = state.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(
            bodies[0],
            serde_json::json!({
                "jobid": "job-123",
                "files": [
                    {"status": "Supported", "name": "a.pdf"},
                    {"status": "Unsupported", "name": "c.docx"},
                ],
            })
        );
    }

    #[tokio::test]
    async fn test_update_job_status_sends_api_key_header() {
        let (endpoint, state) = spawn_status_server(StatusCode::NO_CONTENT).await;
        let reporter = reporter_for(endpoint, Some("secret-key"));

        reporter.update_job_status(&sample_report()).await.unwrap();

        let headers = state.headers.lock().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].get("x-api-key").unwrap(), "secret-key");
        assert_eq!(headers[0].get("user-agent").unwrap(), "Docgate-Reporter/1.0");
    }

    #[tokio::test]
    async fn test_update_job_status_omits_api_key_when_unset() {
        let (endpoint, state) = spawn_status_server(StatusCode::OK).await;
        let reporter = reporter_for(endpoint, None);

        reporter.update_job_status(&sample_report()).await.unwrap();

        let headers = state.headers.lock().unwrap();
        assert!(headers[0].get("x-api-key").is_none());
    }

    #[tokio::test]
    async fn test_update_job_status_fails_on_non_2xx() {
        let (endpoint, state) = spawn_status_server(StatusCode::INTERNAL_SERVER_ERROR).await;
        let reporter = reporter_for(endpoint, None);

        let err = reporter
            .update_job_status(&sample_report())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("500"));
        // The report was still delivered; only the acknowledgement failed.
        assert_eq!(state.bodies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_job_status_fails_when_unreachable() {
        let reporter = reporter_for("http://127.0.0.1:1/status".to_string(), None);

        let err = reporter
            .update_job_status(&sample_report())
            .await
            .unwrap_err();

        assert!(err
            .to_string()
            .contains("Failed to reach ingestion-status service"));
    }
}
