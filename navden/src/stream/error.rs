//! Error types for the telemetry stream.

use thiserror::Error;

/// Errors that can occur on the WebSocket telemetry channel.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The base URL cannot be turned into a WebSocket URL.
    #[error("Invalid stream URL '{0}'")]
    InvalidUrl(String),

    /// The WebSocket handshake failed.
    #[error("Failed to connect to {url}: {reason}")]
    ConnectError { url: String, reason: String },

    /// The connection broke while reading frames.
    #[error("WebSocket error: {0}")]
    ProtocolError(String),

    /// A frame was not valid JSON or had an unknown `type`.
    #[error("Malformed frame: {0}")]
    ParseError(String),
}
