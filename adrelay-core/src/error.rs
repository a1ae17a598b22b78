//! Core error types for `AdRelay`.

use thiserror::Error;

/// Core error type for `AdRelay` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown or unsupported language code.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Unknown provider name.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Invalid creative configuration.
    #[error("Invalid creative: {0}")]
    InvalidCreative(String),
}
