//! Error types for the backend REST client.

use thiserror::Error;

/// Errors surfaced by [`BackendClient`](super::BackendClient) calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body was not the JSON we expected.
    #[error("Failed to parse response: {0}")]
    JsonError(String),

    /// The backend has no simulator yet (no run has been started).
    #[error("Backend not ready: {0}")]
    NotInitialized(String),

    /// The request was rejected locally before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The configured base URL is unusable.
    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),
}

impl ClientError {
    /// True when the error came from the backend being unreachable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::HttpError(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::HttpError(e.to_string())
    }
}
