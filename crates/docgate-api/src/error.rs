//! HTTP rendering of application errors.
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; any `AppError`
//! (or anything convertible into one) bubbles up through `?` and renders as a
//! consistent JSON body with the right status code and a structured log line.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docgate_core::{AppError, ErrorMetadata, LogLevel};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Client-safe message.
    pub error: String,
    /// Diagnostic detail, omitted in production and for sensitive errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Stable machine-readable code, e.g. `INVALID_INPUT`.
    pub code: String,
    /// Whether retrying the request can succeed.
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Newtype giving [AppError] an `IntoResponse` impl. Both the trait (axum)
/// and the error (docgate-core) are foreign here, so the orphan rule requires
/// a local wrapper.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = format!("Invalid event payload: {}", rejection.body_text());
        HttpAppError(AppError::InvalidInput(message))
    }
}

/// JSON extractor whose rejection is an [ErrorResponse] (400 + JSON) instead
/// of axum's plain-text default. Handlers take this in place of `Json<T>` so
/// malformed events fail in the same shape as every other error.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(%error, error_type, "Returning error response"),
        LogLevel::Warn => tracing::warn!(%error, error_type, "Returning error response"),
        LogLevel::Error => tracing::error!(%error, error_type, "Returning error response"),
    }
}

fn is_production_env() -> bool {
    let env = std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_default()
        .to_lowercase();
    env == "production" || env == "prod"
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = self.0;
        log_error(&error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Details stay server-side in production and for sensitive errors.
        let expose_details = !is_production_env() && !error.is_sensitive();

        let body = ErrorResponse {
            error: error.client_message(),
            details: expose_details.then(|| error.detailed_message()),
            error_type: expose_details.then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        };

        (status, Json(body)).into_response()
    }
}
