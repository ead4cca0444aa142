use docgate_core::Config;

/// Initialize telemetry from the loaded configuration.
///
/// Delegates to docgate-infra, which installs the OTLP pipelines under the
/// `observability-opentelemetry` feature and plain fmt tracing otherwise.
pub fn init_telemetry(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    docgate_infra::init_telemetry(
        config.otel_enabled(),
        config.otel_endpoint().map(|s| s.to_string()),
        config.otel_service_name().to_string(),
        config.otel_service_version().to_string(),
        config.otel_protocol().to_string(),
        config.environment().to_string(),
        config.otel_sampler().to_string(),
        config.otel_sample_ratio(),
        config.otel_metrics_interval_secs(),
    )
}

pub async fn shutdown_telemetry() {
    docgate_infra::shutdown_telemetry().await;
}
