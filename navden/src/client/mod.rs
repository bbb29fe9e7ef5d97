//! REST client for the NAVDEN backend.
//!
//! # Architecture
//!
//! ```text
//! BackendClient trait ──► HttpBackendClient (reqwest)
//!        │
//!        ├── envelope::decode  {"success": .., "<field>": ..} → typed model
//!        └── BackendPoller     periodic snapshots → PollEvent channel
//! ```
//!
//! Errors are logged where they happen and returned to the caller. There is
//! no retry or backoff: the dashboard decides what to do with a failure.

mod api;
mod config;
mod envelope;
mod error;
mod http;
mod poller;

pub use api::BackendClient;
pub use config::{ClientConfig, DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRAJECTORY_LIMIT};
pub use error::ClientError;
pub use http::HttpBackendClient;
pub use poller::{
    fetch_snapshot, BackendPoller, BackendSnapshot, PollEvent, PollerConfig, DEFAULT_POLL_INTERVAL,
};
