//! API constants.

/// Prefix for all versioned API routes.
pub const API_PREFIX: &str = "/api/v0";
