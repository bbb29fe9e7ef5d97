//! NAVDEN - client for the GPS-denied UAV navigation simulator
//!
//! This library talks to the NAVDEN backend (REST + `/ws` stream), keeps the
//! dashboard's view of a run, and provides the local guidance demo and the
//! mission planner used by the `navden` terminal client.
//!
//! # High-Level API
//!
//! ```ignore
//! use navden::client::{BackendClient, ClientConfig, HttpBackendClient};
//! use navden::model::SimulationRequest;
//!
//! let client = HttpBackendClient::new(ClientConfig::new("http://localhost:8000"))?;
//! let results = client.run_simulation(SimulationRequest::new(90.0, 0.1)).await?;
//! println!("{} samples", results.trajectory_data.len());
//! ```

pub mod charts;
pub mod client;
pub mod config;
pub mod demo;
pub mod logging;
pub mod model;
pub mod planner;
pub mod session;
pub mod stream;

/// Version of the NAVDEN library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
