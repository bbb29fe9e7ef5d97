//! Data model exchanged with the NAVDEN backend.
//!
//! These types mirror the JSON shapes the backend produces. The client only
//! reads them; the one exception is [`Waypoint`], which is created and edited
//! locally by the mission planner.
//!
//! - [`NavigationState`] - current vehicle/filter snapshot
//! - [`TrajectoryPoint`] - one sample of the append-only trajectory
//! - [`MissionMetrics`] / [`JammingAnalysis`] - post-run aggregates
//! - [`Waypoint`] - planner entity

mod backend;
mod metrics;
mod state;
mod trajectory;
mod vec2;
mod waypoint;

pub use backend::{
    BackendInfo, CurrentState, HealthStatus, MissionStatus, ResetResult, SimulationRequest,
    SimulationResults, StepMetrics, StepResult, TrajectoryPage, MAX_SIMULATION_DURATION,
};
pub use metrics::{JammingAnalysis, MissionMetrics};
pub use state::{GpsStatus, NavigationMode, NavigationState};
pub use trajectory::{TimeWindow, TrajectoryPoint};
pub use vec2::Vec2;
pub use waypoint::{Waypoint, WaypointId};
