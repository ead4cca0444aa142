//! Liveness and readiness endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub supported_extensions: Vec<String>,
    pub status_api: String,
}

/// Liveness probe: the process is up and serving.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health check. The validator holds no connections open between
/// invocations, so this reports the process and its effective configuration.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        supported_extensions: state.config.supported_extensions().to_vec(),
        status_api: state.config.status_api_url().to_string(),
    };

    (StatusCode::OK, Json(response))
}
