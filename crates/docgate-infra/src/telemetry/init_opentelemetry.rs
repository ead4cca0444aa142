use opentelemetry::{trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::{self as sdkmetrics, PeriodicReader},
    trace::{self as sdktrace, BatchConfig, BatchSpanProcessor, RandomIdGenerator, Sampler},
    Resource,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::env;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::default_env_filter;

/// Map the configured sampler name onto an SDK sampler.
fn select_sampler(sampler: &str, sample_ratio: f64) -> Sampler {
    match sampler {
        "always_off" => Sampler::AlwaysOff,
        "trace_id_ratio" => {
            let ratio = sample_ratio.clamp(0.0, 1.0);
            if ratio <= 0.0 {
                tracing::warn!("OTEL_SAMPLE_RATIO at or below zero, dropping all traces");
                Sampler::AlwaysOff
            } else if ratio >= 1.0 {
                Sampler::AlwaysOn
            } else {
                tracing::info!(ratio, "Using TraceIdRatioBased sampler");
                Sampler::TraceIdRatioBased(ratio)
            }
        }
        "always_on" => Sampler::AlwaysOn,
        other => {
            tracing::warn!(sampler = %other, "Unknown sampler type, defaulting to AlwaysOn");
            Sampler::AlwaysOn
        }
    }
}

fn build_span_exporter(
    protocol: &str,
    endpoint: &str,
) -> Result<opentelemetry_otlp::SpanExporter, Box<dyn std::error::Error>> {
    let exporter = if protocol == "http" {
        opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()
    } else {
        opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
    };
    exporter.map_err(|e| format!("Failed to build {} span exporter: {}", protocol, e).into())
}

fn build_metric_exporter(
    protocol: &str,
    endpoint: &str,
) -> Result<opentelemetry_otlp::MetricExporter, Box<dyn std::error::Error>> {
    let exporter = if protocol == "http" {
        opentelemetry_otlp::MetricExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .with_temporality(sdkmetrics::Temporality::Cumulative)
            .build()
    } else {
        opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .with_temporality(sdkmetrics::Temporality::Cumulative)
            .build()
    };
    exporter.map_err(|e| format!("Failed to build {} metric exporter: {}", protocol, e).into())
}

/// Install the OTLP trace and metric pipelines plus the fmt subscriber.
/// Note: OTLP log export is not configured; the global logger provider was
/// removed in opentelemetry 0.27. Log lines still reach stdout via fmt.
#[allow(clippy::too_many_arguments)]
pub fn init_telemetry(
    enabled: bool,
    endpoint: Option<String>,
    service_name: String,
    service_version: String,
    protocol: String,
    environment: String,
    sampler: String,
    sample_ratio: f64,
    metrics_interval_secs: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let endpoint = match endpoint {
        Some(endpoint) if enabled => endpoint,
        _ => {
            tracing_subscriber::registry()
                .with(default_env_filter())
                .with(tracing_subscriber::fmt::layer())
                .init();

            tracing::info!("OpenTelemetry export disabled, logging locally only");
            return Ok(());
        }
    };

    // Hostname and instance id distinguish replicas in the exported resource
    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.to_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown".to_string());
    let instance_id =
        env::var("OTEL_SERVICE_INSTANCE_ID").unwrap_or_else(|_| uuid::Uuid::new_v4().to_string());

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, service_name.clone()),
        KeyValue::new(SERVICE_VERSION, service_version.clone()),
        KeyValue::new("deployment.environment", environment.clone()),
        KeyValue::new("host.name", hostname.clone()),
        KeyValue::new("service.instance.id", instance_id.clone()),
    ]);

    let batch_processor = BatchSpanProcessor::builder(
        build_span_exporter(&protocol, &endpoint)?,
        opentelemetry_sdk::runtime::Tokio,
    )
    .with_batch_config(BatchConfig::default())
    .build();

    let tracer_provider = sdktrace::TracerProvider::builder()
        .with_span_processor(batch_processor)
        .with_sampler(select_sampler(&sampler, sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource.clone())
        .build();

    let tracer = tracer_provider.tracer(service_name.clone());
    opentelemetry::global::set_tracer_provider(tracer_provider);

    let otlp_reader = PeriodicReader::builder(
        build_metric_exporter(&protocol, &endpoint)?,
        opentelemetry_sdk::runtime::Tokio,
    )
    .with_interval(Duration::from_secs(metrics_interval_secs))
    .build();

    let meter_provider = sdkmetrics::SdkMeterProvider::builder()
        .with_reader(otlp_reader)
        .with_resource(resource)
        .build();

    opentelemetry::global::set_meter_provider(meter_provider);

    // Subscriber stack: env filter, fmt to stdout, span export
    tracing_subscriber::registry()
        .with(default_env_filter())
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    tracing::info!(
        endpoint = %endpoint,
        protocol = %protocol,
        environment = %environment,
        sampler = %sampler,
        sample_ratio = sample_ratio,
        metrics_interval_secs = metrics_interval_secs,
        hostname = %hostname,
        instance_id = %instance_id,
        "OpenTelemetry pipelines ready"
    );

    Ok(())
}

pub async fn shutdown_telemetry() {
    tracing::info!("Flushing OpenTelemetry exporters");

    opentelemetry::global::shutdown_tracer_provider();

    // MeterProvider flush is best-effort on drop.

    tracing::info!("OpenTelemetry exporters stopped");
}
