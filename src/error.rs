//! Error types for Heatstrain
//!
//! Scoring itself never fails: missing or degenerate inputs surface as NaN or
//! infinite scores. These errors cover the parsing, configuration and encoding
//! boundaries around the engine.

use thiserror::Error;

/// Errors that can occur at the engine boundaries
#[derive(Debug, Error)]
pub enum HeatRiskError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid user profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown sensor channel: {0}")]
    UnknownChannel(String),

    #[error("Invalid baseline: {0}")]
    InvalidBaseline(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
