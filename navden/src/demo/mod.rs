//! Local guidance demo: a toy navigation loop that runs without a backend.
//!
//! Each tick advances a fixed timestep:
//!
//! ```text
//! guidance ──accel──► truth (Euler) ──► GPS read ±R ─┐
//!     │                                              ├─► blend ─► estimate
//!     └──accel──► IMU read ±Q ──► prediction (Euler) ┘
//! ```
//!
//! Inside the jamming window the GPS read is skipped and the estimate is the
//! pure IMU prediction. [`DemoRunner`] drives a [`DemoEngine`] from a tokio
//! interval and streams [`DemoFrame`]s to the dashboard.

mod config;
mod engine;
mod guidance;
mod noise;
mod runner;

pub use config::{default_waypoints, DemoConfig, DEFAULT_START};
pub use engine::{confidence_score, DemoEngine, DemoFrame};
pub use guidance::{Guidance, GuidanceOutput};
pub use noise::{NoiseSource, UniformNoise, ZeroNoise};
pub use runner::DemoRunner;

/// Fixed integration step in seconds.
pub const DEFAULT_DT: f64 = 0.05;

/// Guidance gain k.
pub const DEFAULT_GAIN: f64 = 4.0;

/// A waypoint counts as reached below this distance.
pub const DEFAULT_ARRIVAL_THRESHOLD: f64 = 5.0;

/// Correction blend K while GPS is available.
pub const DEFAULT_BLEND: f64 = 0.15;

/// Wall-clock interval between ticks.
pub const DEFAULT_TICK_MS: u64 = 50;

/// A run stops after this much simulated time even if waypoints remain.
///
/// Pursuit with a constant-magnitude command and no damping can orbit a
/// waypoint that was approached off-axis.
pub const DEFAULT_MAX_DURATION: f64 = 300.0;

/// Confidence never drops below this value.
pub const MIN_CONFIDENCE: f64 = 5.0;

/// Exponential decay rate of confidence per unit of drift.
pub const CONFIDENCE_DECAY: f64 = 0.05;
