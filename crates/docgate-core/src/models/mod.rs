//! Data models for the ingestion input-validation service
//!
//! Wire-facing structures only: the trigger event envelope consumed by the
//! handler, the per-file classification results returned to the platform,
//! and the report forwarded to the status service.

mod event;
mod file;

// Re-export all models for convenient imports
pub use event::*;
pub use file::*;
