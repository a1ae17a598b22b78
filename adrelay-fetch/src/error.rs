//! Fetch and host error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for remote operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Invalid response from the backend.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required configuration missing.
    #[error("Not configured: {0}")]
    NotConfigured(String),
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success status code.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

// ============================================================================
// SDK Error
// ============================================================================

/// Error type for third-party ad SDK operations.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Script failed to load.
    #[error("Script failed to load: {0}")]
    LoadFailed(String),

    /// Script did not load in time.
    #[error("Script load timed out after {0:?}")]
    LoadTimeout(Duration),

    /// Script loaded but did not expose its entry point.
    #[error("SDK global missing after load: {0}")]
    GlobalMissing(String),

    /// The controller rejected the show request.
    #[error("Show failed: {0}")]
    ShowFailed(String),

    /// The host cannot run third-party scripts.
    #[error("Script runtime unavailable")]
    Unsupported,
}
