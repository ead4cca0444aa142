//! Application wiring
//!
//! Builds every long-lived component once at startup: telemetry, the
//! classifier, the status reporter client, shared state, and the router.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use docgate_core::{Config, InputValidator};
use docgate_infra::{HttpStatusReporter, StatusReporter, StatusReporterConfig};

use crate::state::AppState;
use crate::telemetry::metrics::ValidationMetrics;

/// Assemble the application: telemetry, shared state, and the router.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Reject bad configuration before any component is built.
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let validator = InputValidator::new(config.supported_extensions());

    let reporter: Arc<dyn StatusReporter> = Arc::new(
        HttpStatusReporter::new(StatusReporterConfig {
            endpoint: config.status_api_url().to_string(),
            api_key: config.status_api_key().map(|s| s.to_string()),
            timeout_seconds: config.status_api_timeout_seconds(),
        })
        .context("Failed to create status reporter")?,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        validator,
        reporter,
        metrics: ValidationMetrics::from_global(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
