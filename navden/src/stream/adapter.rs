//! Stream adapter: reads the backend's `/ws` channel and forwards decoded frames.
//!
//! Follows the same daemon shape as the other background tasks in this crate:
//! - `new()` + `start()` spawns the task
//! - async `run()` loop
//! - stops when the socket closes, the receiver is dropped, or the
//!   cancellation token fires
//!
//! There is no reconnect and no heartbeat. Frames are forwarded in arrival
//! order. A frame that fails to parse is reported as
//! [`StreamEvent::Malformed`] and skipped instead of tearing the stream down.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use super::error::StreamError;
use super::protocol::{parse_message, StreamMessage};

/// Events emitted by the adapter, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Handshake completed.
    Connected { url: String },
    /// A well-formed frame.
    Message(StreamMessage),
    /// A frame that could not be decoded (carries the parse error).
    Malformed(String),
    /// The stream ended. Carries the close reason or error, if any.
    Closed(Option<String>),
}

/// WebSocket telemetry adapter.
pub struct StreamAdapter {
    url: String,
    events_tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
}

impl StreamAdapter {
    /// Create an adapter for a full `ws://` / `wss://` URL.
    pub fn new(
        url: impl Into<String>,
        events_tx: mpsc::Sender<StreamEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            url: url.into(),
            events_tx,
            cancel,
        }
    }

    /// Create an adapter for the `/ws` endpoint of an HTTP base URL.
    pub fn for_backend(
        base_url: &str,
        events_tx: mpsc::Sender<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<Self, StreamError> {
        Ok(Self::new(websocket_url(base_url)?, events_tx, cancel))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Start the adapter as an async task.
    pub fn start(self) -> tokio::task::JoinHandle<Result<(), StreamError>> {
        tokio::spawn(async move { self.run().await })
    }

    /// Connect and pump frames until the stream ends.
    pub async fn run(self) -> Result<(), StreamError> {
        tracing::info!(url = %self.url, "Connecting to telemetry stream");

        let connected = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!("Stream cancelled before connecting");
                return Ok(());
            }
            result = tokio_tungstenite::connect_async(self.url.as_str()) => result,
        };

        let (socket, _response) = match connected {
            Ok(pair) => pair,
            Err(e) => {
                let error = StreamError::ConnectError {
                    url: self.url.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %error, "Telemetry stream connection failed");
                let _ = self
                    .events_tx
                    .send(StreamEvent::Closed(Some(error.to_string())))
                    .await;
                return Err(error);
            }
        };

        tracing::info!(url = %self.url, "Telemetry stream connected");
        if self
            .events_tx
            .send(StreamEvent::Connected {
                url: self.url.clone(),
            })
            .await
            .is_err()
        {
            return Ok(());
        }

        let (mut write, mut read) = socket.split();
        let mut close_reason: Option<String> = None;
        let mut outcome = Ok(());
        let mut frames: u64 = 0;

        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Telemetry stream cancelled, closing socket");
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
                next = read.next() => next,
            };

            let event = match next {
                None => break,
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "Telemetry stream read failed");
                    close_reason = Some(e.to_string());
                    outcome = Err(StreamError::ProtocolError(e.to_string()));
                    break;
                }
                Some(Ok(Message::Text(text))) => {
                    frames += 1;
                    match parse_message(&text) {
                        Ok(message) => {
                            tracing::trace!(kind = message.kind(), "Frame received");
                            StreamEvent::Message(message)
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Skipping malformed telemetry frame");
                            StreamEvent::Malformed(e.to_string())
                        }
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    close_reason = frame
                        .map(|f| f.reason.to_string())
                        .filter(|reason| !reason.is_empty());
                    break;
                }
                // Binary, ping and pong frames carry no telemetry.
                Some(Ok(_)) => continue,
            };

            if self.events_tx.send(event).await.is_err() {
                tracing::debug!("Stream receiver dropped, stopping");
                break;
            }
        }

        tracing::info!(frames, reason = ?close_reason, "Telemetry stream closed");
        let _ = self.events_tx.send(StreamEvent::Closed(close_reason)).await;
        outcome
    }
}

/// Derive the `/ws` endpoint from an HTTP(S) base URL.
///
/// `http://host:8000` becomes `ws://host:8000/ws`; `https` maps to `wss`.
/// URLs that already use a WebSocket scheme are kept as they are.
pub fn websocket_url(base_url: &str) -> Result<String, StreamError> {
    let base = base_url.trim().trim_end_matches('/');

    let rewritten = if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if base.starts_with("ws://") || base.starts_with("wss://") {
        base.to_string()
    } else {
        return Err(StreamError::InvalidUrl(base_url.to_string()));
    };

    if rewritten.ends_with("/ws") {
        Ok(rewritten)
    } else {
        Ok(format!("{}/ws", rewritten))
    }
}
