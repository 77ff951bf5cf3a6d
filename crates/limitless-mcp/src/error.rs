//! # Error Types
//!
//! Startup configuration errors and upstream request errors.

use thiserror::Error;

/// Upstream request result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while resolving process configuration. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Limitless API key is not configured. Set LIMITLESS_API_KEY, pass --api-key <KEY>, \
         or pass api-key=<KEY> as an argument"
    )]
    MissingApiKey,

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors raised by a single upstream request attempt.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid request URL for endpoint '{endpoint}': {reason}")]
    Url { endpoint: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream HTTP error: {status} {status_text}")]
    UpstreamStatus { status: u16, status_text: String },

    #[error("Failed to parse upstream response as JSON: {0}")]
    Decode(String),
}

impl ClientError {
    /// Create an upstream status error from a non-success HTTP status
    pub fn upstream_status(status: reqwest::StatusCode) -> Self {
        Self::UpstreamStatus {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// HTTP status code carried by the error, if the upstream answered at all
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::UpstreamStatus { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
