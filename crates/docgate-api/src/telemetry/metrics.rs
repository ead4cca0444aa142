//! Classification metrics for the ingestion pipeline.
//!
//! Counter names are part of the pipeline's dashboard contract:
//! `SupportedFile`, `UnsupportedFile`, and `ColdStart`. Every data point is
//! attributed with the ingestion job id as `correlationId`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "observability-opentelemetry")]
use opentelemetry::{
    metrics::{Counter, Meter},
    KeyValue,
};

/// Meter namespace shared with the rest of the ingestion pipeline.
#[cfg(feature = "observability-opentelemetry")]
const METER_NAME: &str = "ingestion_pipeline";

#[cfg(feature = "observability-opentelemetry")]
#[derive(Clone)]
pub struct ValidationMetrics {
    supported_files: Counter<u64>,
    unsupported_files: Counter<u64>,
    cold_starts: Counter<u64>,
    cold_start_recorded: Arc<AtomicBool>,
}

#[cfg(not(feature = "observability-opentelemetry"))]
#[derive(Clone)]
pub struct ValidationMetrics {
    cold_start_recorded: Arc<AtomicBool>,
}

#[cfg(feature = "observability-opentelemetry")]
impl ValidationMetrics {
    pub fn new(meter: Meter) -> Self {
        let supported_files = meter
            .u64_counter("SupportedFile")
            .with_description("Files accepted for ingestion")
            .build();

        let unsupported_files = meter
            .u64_counter("UnsupportedFile")
            .with_description("Files rejected by the extension allow-list")
            .build();

        let cold_starts = meter
            .u64_counter("ColdStart")
            .with_description("First invocation after process start")
            .build();

        Self {
            supported_files,
            unsupported_files,
            cold_starts,
            cold_start_recorded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Metrics against the global meter. A no-op unless OTLP export was initialized.
    pub fn from_global() -> Self {
        Self::new(opentelemetry::global::meter(METER_NAME))
    }

    pub fn record_classification(&self, correlation_id: &str, supported: u64, unsupported: u64) {
        let labels = &[KeyValue::new("correlationId", correlation_id.to_string())];

        if supported > 0 {
            self.supported_files.add(supported, labels);
        }
        if unsupported > 0 {
            self.unsupported_files.add(unsupported, labels);
        }
    }

    /// Record the cold start once per process, attributed to the first
    /// invocation's correlation id.
    pub fn record_cold_start(&self, correlation_id: &str) {
        if !self.cold_start_recorded.swap(true, Ordering::Relaxed) {
            self.cold_starts.add(
                1,
                &[KeyValue::new("correlationId", correlation_id.to_string())],
            );
            tracing::info!(correlation_id = %correlation_id, "Cold start");
        }
    }
}

#[cfg(not(feature = "observability-opentelemetry"))]
impl ValidationMetrics {
    pub fn new(_meter: ()) -> Self {
        Self {
            cold_start_recorded: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_global() -> Self {
        Self::new(())
    }

    pub fn record_classification(&self, _correlation_id: &str, _supported: u64, _unsupported: u64) {
        // Counters are exported only with the OpenTelemetry feature
    }

    pub fn record_cold_start(&self, correlation_id: &str) {
        if !self.cold_start_recorded.swap(true, Ordering::Relaxed) {
            tracing::info!(correlation_id = %correlation_id, "Cold start");
        }
    }
}
