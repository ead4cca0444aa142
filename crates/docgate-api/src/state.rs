//! Application state shared across handlers.

use std::sync::Arc;

use docgate_core::{Config, InputValidator};
use docgate_infra::StatusReporter;

use crate::telemetry::metrics::ValidationMetrics;

/// Main application state: configuration, the file classifier, the status
/// reporter, and classification metrics.
pub struct AppState {
    pub config: Config,
    pub validator: InputValidator,
    pub reporter: Arc<dyn StatusReporter>,
    pub metrics: ValidationMetrics,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
