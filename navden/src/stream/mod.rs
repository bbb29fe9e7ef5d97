//! Live telemetry over the backend's `/ws` WebSocket.
//!
//! # Architecture
//!
//! ```text
//! StreamAdapter (tokio task)
//!     │  tokio-tungstenite: text frame → parse_message()
//!     │
//!     └── mpsc::Sender<StreamEvent>
//!             │
//!             └── DashboardSession::apply_event()
//! ```
//!
//! The client never sends application messages on this channel.

mod adapter;
mod error;
mod protocol;

pub use adapter::{websocket_url, StreamAdapter, StreamEvent};
pub use error::StreamError;
pub use protocol::{
    parse_message, CompleteFrame, ErrorFrame, LiveMetrics, StartFrame, StreamMessage,
    UpdateData, UpdateFrame,
};
