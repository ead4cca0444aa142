//! Telemetry initialization and classification metrics.

mod init;
pub mod metrics;

pub use init::{init_telemetry, shutdown_telemetry};
