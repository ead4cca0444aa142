use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::default_env_filter;

/// Initialize plain structured logging: an env-filtered fmt subscriber,
/// nothing exported. The signature matches the OTLP variant so callers never
/// branch on the feature; the pipeline parameters are simply unused here.
#[allow(clippy::too_many_arguments)]
pub fn init_telemetry(
    _enabled: bool,
    _endpoint: Option<String>,
    _service_name: String,
    _service_version: String,
    _protocol: String,
    _environment: String,
    _sampler: String,
    _sample_ratio: f64,
    _metrics_interval_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(default_env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("OpenTelemetry support not compiled in, logging only");
    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::debug!("No telemetry pipelines to flush");
}
