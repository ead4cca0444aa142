//! Docgate Infrastructure Library
//!
//! This crate provides shared infrastructure for the docgate service:
//! - Telemetry initialization (OpenTelemetry or plain tracing)
//! - Status reporting client for the ingestion pipeline

#[cfg(feature = "observability-basic")]
pub mod telemetry;

#[cfg(feature = "reporter")]
pub mod reporter;

// Re-export commonly used types
#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry};

#[cfg(feature = "reporter")]
pub use reporter::{HttpStatusReporter, StatusReporter, StatusReporterConfig};
