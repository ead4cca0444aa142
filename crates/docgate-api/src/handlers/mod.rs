//! HTTP handlers.

pub mod ingestion;
