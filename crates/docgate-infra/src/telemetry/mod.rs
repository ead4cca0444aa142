//! Telemetry initialization
//!
//! Structured logging always goes through `tracing`; with the
//! `observability-opentelemetry` feature enabled, traces and metrics are
//! additionally exported over OTLP.

use tracing_subscriber::EnvFilter;

#[cfg(feature = "observability-opentelemetry")]
mod init_opentelemetry;

#[cfg(not(feature = "observability-opentelemetry"))]
mod init_basic;

#[cfg(feature = "observability-opentelemetry")]
pub use init_opentelemetry::{init_telemetry, shutdown_telemetry};

#[cfg(not(feature = "observability-opentelemetry"))]
pub use init_basic::{init_telemetry, shutdown_telemetry};

/// RUST_LOG if set, otherwise debug for this service and the HTTP trace layer.
pub(crate) fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "docgate=debug,tower_http=debug".into())
}
