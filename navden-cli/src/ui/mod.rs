//! Terminal UI for NAVDEN.
//!
//! A live dashboard over a [`navden::session::DashboardSession`]: flight
//! path, telemetry, mission progress, and error/confidence charts.

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardConfig, DashboardEvent};
