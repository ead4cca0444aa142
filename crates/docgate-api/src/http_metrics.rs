//! Request-level spans, logs, and instruments for the HTTP shell.
//!
//! One [RequestTelemetry] value serves as all four `TraceLayer` callbacks.
//! The instruments talk to the global meter, which the no-op twin makes free
//! when the OpenTelemetry feature is off.

use std::time::Duration;

use axum::{
    extract::MatchedPath,
    http::{Request, Response},
};
#[cfg(feature = "observability-opentelemetry")]
use opentelemetry::{
    metrics::{Counter, Histogram},
    KeyValue,
};
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::trace::{MakeSpan, OnFailure, OnRequest, OnResponse};
use tracing::Span;

/// Request count, latency, and error instruments.
///
/// The service exposes a single ingestion route, so instruments are labeled
/// by status code only; method and route live on the span instead.
#[cfg(feature = "observability-opentelemetry")]
#[derive(Clone)]
pub struct HttpMetrics {
    request_counter: Counter<u64>,
    request_duration: Histogram<f64>,
    error_counter: Counter<u64>,
}

#[cfg(feature = "observability-opentelemetry")]
impl HttpMetrics {
    /// Instruments on the global meter. No-ops unless OTLP export was initialized.
    pub fn from_global() -> Self {
        let meter = opentelemetry::global::meter("docgate");
        Self {
            request_counter: meter
                .u64_counter("http.server.request.count")
                .with_description("Requests handled, by status code")
                .build(),
            request_duration: meter
                .f64_histogram("http.server.request.duration")
                .with_description("Time from request receipt to response")
                .with_unit("s")
                .build(),
            error_counter: meter
                .u64_counter("http.server.errors.count")
                .with_description("Responses with a 4xx or 5xx status")
                .build(),
        }
    }

    fn record_request(&self, status: u16, seconds: f64) {
        let labels = &[KeyValue::new("http.status_code", status.to_string())];

        self.request_counter.add(1, labels);
        self.request_duration.record(seconds, labels);
        if status >= 400 {
            self.error_counter.add(1, labels);
        }
    }
}

#[cfg(not(feature = "observability-opentelemetry"))]
#[derive(Clone)]
pub struct HttpMetrics;

#[cfg(not(feature = "observability-opentelemetry"))]
impl HttpMetrics {
    pub fn from_global() -> Self {
        Self
    }

    fn record_request(&self, _status: u16, _seconds: f64) {}
}

/// Span factory, request/response logging, and HTTP metric recording rolled
/// into one `Clone` value; pass clones of it to every `TraceLayer` callback
/// slot.
#[derive(Clone)]
pub struct RequestTelemetry {
    metrics: HttpMetrics,
}

impl RequestTelemetry {
    pub fn from_global_meter() -> Self {
        Self {
            metrics: HttpMetrics::from_global(),
        }
    }
}

impl<B> MakeSpan<B> for RequestTelemetry {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method().as_str();
        let target = request.uri().path();
        // Matched route template, not the raw path
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(|mp| mp.as_str())
            .unwrap_or(target);

        let span = tracing::info_span!(
            "http_request",
            otel.name = %format!("{} {}", method, route),
            otel.kind = "server",
            http.method = %method,
            http.route = %route,
            http.target = %target,
            http.status_code = tracing::field::Empty,
            http.request_content_length = tracing::field::Empty,
        );

        if let Some(length) = request
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
        {
            span.record("http.request_content_length", length);
        }

        span
    }
}

impl<B> OnRequest<B> for RequestTelemetry {
    fn on_request(&mut self, _request: &Request<B>, _span: &Span) {
        tracing::debug!("started processing request");
    }
}

impl<B> OnResponse<B> for RequestTelemetry {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status().as_u16();
        span.record("http.status_code", status);

        self.metrics.record_request(status, latency.as_secs_f64());

        let latency_ms = latency.as_millis();
        if response.status().is_server_error() {
            tracing::error!(status, latency_ms, "request failed");
        } else if response.status().is_client_error() {
            tracing::warn!(status, latency_ms, "client error");
        } else {
            tracing::info!(status, latency_ms, "request completed");
        }
    }
}

impl OnFailure<ServerErrorsFailureClass> for RequestTelemetry {
    fn on_failure(&mut self, failure: ServerErrorsFailureClass, latency: Duration, span: &Span) {
        // 5xx responses were already logged and counted in on_response; only
        // requests that died without producing a response are new here.
        if let ServerErrorsFailureClass::Error(err) = failure {
            span.record("http.status_code", 500);

            tracing::error!(
                latency_ms = latency.as_millis(),
                error = %err,
                "request failed before a response"
            );

            self.metrics.record_request(500, latency.as_secs_f64());
        }
    }
}
