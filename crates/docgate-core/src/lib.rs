//! Docgate Core Library
//!
//! This crate provides the domain models, file classification logic, error
//! types, and configuration shared across all docgate components.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ValidatorConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::InputValidator;
