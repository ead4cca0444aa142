//! Error types for the validation service.
//!
//! There is no domain error taxonomy: any failure aborts the invocation.
//! [AppError] therefore covers just the ways an invocation can end badly:
//! a malformed event, a status-service failure, or an internal fault.

use std::io;

/// Severity used when an error is logged at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected failures, e.g. malformed events.
    Debug,
    /// Degraded but recoverable conditions.
    Warn,
    /// Unexpected faults.
    Error,
}

/// How an error presents itself at the HTTP boundary.
///
/// Implementors describe their own status code, wire code, and client-safe
/// message, so response rendering needs no per-variant knowledge.
pub trait ErrorMetadata {
    /// HTTP status code for the response.
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code, e.g. `STATUS_REPORT_FAILED`.
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request can succeed.
    fn is_recoverable(&self) -> bool;

    /// What the client should do about it, if anything.
    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to return to clients.
    fn client_message(&self) -> String;

    /// Whether diagnostic detail must be withheld from responses.
    fn is_sensitive(&self) -> bool;

    /// Severity for the structured log line.
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Status report failed: {message}")]
    StatusReport {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Response-shaping metadata, one value per variant.
struct ResponseMeta {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

impl AppError {
    fn response_meta(&self) -> ResponseMeta {
        match self {
            AppError::InvalidInput(_) => ResponseMeta {
                status: 400,
                code: "INVALID_INPUT",
                recoverable: false,
                action: Some("Check the event payload fields and try again"),
                sensitive: false,
                level: LogLevel::Debug,
            },
            AppError::StatusReport { .. } => ResponseMeta {
                status: 502,
                code: "STATUS_REPORT_FAILED",
                recoverable: true,
                action: Some("Retry once the ingestion-status service is reachable"),
                sensitive: true,
                level: LogLevel::Error,
            },
            AppError::Internal(_) | AppError::InternalWithSource { .. } => ResponseMeta {
                status: 500,
                code: "INTERNAL_ERROR",
                recoverable: true,
                action: Some("Retry after a short delay"),
                sensitive: true,
                level: LogLevel::Error,
            },
        }
    }

    /// Variant name exposed in non-production error bodies.
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::StatusReport { .. } => "StatusReport",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Render the error and its source chain, one `Caused by:` line per cause.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        const MAX_CAUSES: usize = 5;

        let mut out = self.to_string();
        let causes = std::iter::successors(self.source(), |err| Error::source(*err));
        for (depth, cause) in causes.enumerate() {
            if depth == MAX_CAUSES {
                out.push_str("\n  ... (truncated)");
                break;
            }
            out.push_str(&format!("\n  Caused by: {}", cause));
        }
        out
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.response_meta().status
    }

    fn error_code(&self) -> &'static str {
        self.response_meta().code
    }

    fn is_recoverable(&self) -> bool {
        self.response_meta().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.response_meta().action
    }

    fn is_sensitive(&self) -> bool {
        self.response_meta().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.response_meta().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::StatusReport { .. } => {
                "Failed to update ingestion job status".to_string()
            }
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_invalid_input() {
        let err = AppError::InvalidInput("files must be a list".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "files must be a list");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_status_report() {
        let err = AppError::StatusReport {
            message: "status service returned 500".to_string(),
            source: anyhow::anyhow!("HTTP 500"),
        };
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "STATUS_REPORT_FAILED");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to update ingestion job status");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_from_anyhow_preserves_source_chain() {
        let inner = anyhow::anyhow!("connection refused").context("client build failed");
        let err = AppError::from(inner);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_type(), "Internal");
        let details = err.detailed_message();
        assert!(details.contains("client build failed"));
        assert!(details.contains("Caused by: connection refused"));
    }

    #[test]
    fn test_from_serde_json_maps_to_invalid_input() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = AppError::from(parse_err);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err1 = AppError::InvalidInput("test".to_string());
        assert_eq!(
            err1.suggested_action(),
            Some("Check the event payload fields and try again")
        );

        let err2 = AppError::StatusReport {
            message: "test".to_string(),
            source: anyhow::anyhow!("boom"),
        };
        assert_eq!(
            err2.suggested_action(),
            Some("Retry once the ingestion-status service is reachable")
        );
    }
}
