//! Route configuration and setup.
//!
//! Health checks live in [health](health); the ingestion endpoint in
//! [crate::handlers::ingestion].

mod health;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use docgate_core::Config;

use crate::constants;
use crate::http_metrics::RequestTelemetry;
use crate::state::AppState;

/// In-flight request cap, tunable via HTTP_CONCURRENCY_LIMIT.
fn concurrency_limit() -> usize {
    std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1024)
        .max(1)
}

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let telemetry = RequestTelemetry::from_global_meter();
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(telemetry.clone())
        .on_request(telemetry.clone())
        .on_response(telemetry.clone())
        .on_failure(telemetry);

    let limit = concurrency_limit();
    tracing::info!(http_concurrency_limit = limit, "HTTP concurrency limit layer enabled");

    let app = Router::new()
        .route(
            &format!("{}/ingestion/events", constants::API_PREFIX),
            post(crate::handlers::ingestion::handle_ingestion_event),
        )
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(limit))
        .layer(RequestBodyLimitLayer::new(config.max_event_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(trace_layer)
        .with_state(state);

    Ok(app)
}
