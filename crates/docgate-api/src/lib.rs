//! Docgate API Library
//!
//! This crate provides the HTTP surface of the ingestion input validator:
//! the event handler, application setup, and the error response contract.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
mod http_metrics;
pub mod setup;

// Public modules
pub mod error;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
