//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docgate-api --test ingestion_test`
//! or `cargo test -p docgate-api`. The status service is replaced with
//! in-process reporters so no network is involved.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use docgate_api::constants;
use docgate_api::setup::routes;
use docgate_api::state::AppState;
use docgate_api::telemetry::metrics::ValidationMetrics;
use docgate_core::models::JobStatusReport;
use docgate_core::{BaseConfig, Config, InputValidator, ValidatorConfig};
use docgate_infra::StatusReporter;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Records every report it receives; always succeeds.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    pub reports: Arc<Mutex<Vec<JobStatusReport>>>,
}

#[async_trait]
impl StatusReporter for RecordingReporter {
    async fn update_job_status(&self, report: &JobStatusReport) -> anyhow::Result<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// Fails every delivery, standing in for an unreachable status service.
pub struct FailingReporter;

#[async_trait]
impl StatusReporter for FailingReporter {
    async fn update_job_status(&self, _report: &JobStatusReport) -> anyhow::Result<()> {
        anyhow::bail!("status service unreachable")
    }
}

/// Test application: server plus the reports captured behind it.
pub struct TestApp {
    pub server: TestServer,
    pub reports: Arc<Mutex<Vec<JobStatusReport>>>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup test app with a recording reporter and a pdf-only allow-list.
pub fn setup_test_app() -> TestApp {
    let reporter = RecordingReporter::default();
    let reports = reporter.reports.clone();
    let server = server_with_reporter(Arc::new(reporter));

    TestApp { server, reports }
}

/// Build a server around an arbitrary reporter implementation.
pub fn server_with_reporter(reporter: Arc<dyn StatusReporter>) -> TestServer {
    let config = create_test_config();
    let state = Arc::new(AppState {
        config: config.clone(),
        validator: InputValidator::new(config.supported_extensions()),
        reporter,
        metrics: ValidationMetrics::from_global(),
    });

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    // Serve over a real localhost socket so the client sends Content-Length and
    // the RequestBodyLimitLayer can answer oversized requests with 413, as it
    // does for real clients. The mock transport omits the header, which would
    // bypass the layer's early rejection.
    TestServer::builder()
        .http_transport()
        .build(app.into_make_service())
        .expect("Failed to create test server")
}

fn create_test_config() -> Config {
    let base = BaseConfig {
        server_port: 4000,
        environment: "test".to_string(),
        otel_enabled: false,
        otel_endpoint: String::new(),
        otel_service_name: "docgate-test".to_string(),
        otel_service_version: "0.1.0".to_string(),
        otel_protocol: "grpc".to_string(),
        otel_sampler: "always_on".to_string(),
        otel_sample_ratio: 1.0,
        otel_metrics_interval_secs: 30,
    };
    Config(Box::new(ValidatorConfig {
        base,
        supported_extensions: vec!["pdf".to_string()],
        status_api_url: "http://localhost:9/status".to_string(),
        status_api_key: None,
        status_api_timeout_seconds: 5,
        max_event_size_bytes: 1024 * 1024,
    }))
}
