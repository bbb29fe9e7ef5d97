//! Trajectory samples and time windows.

use serde::{Deserialize, Serialize};

use super::state::{GpsStatus, NavigationMode};
use super::vec2::Vec2;

/// One sample of the recorded trajectory.
///
/// The trajectory is an append-only, time-ordered sequence owned by the
/// backend (or by the local demo loop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub true_x: f64,
    pub true_y: f64,
    pub est_x: f64,
    pub est_y: f64,
    pub error: f64,
    pub confidence: f64,
    #[serde(default)]
    pub gps_status: GpsStatus,
    #[serde(default)]
    pub nav_mode: NavigationMode,
}

impl TrajectoryPoint {
    pub fn true_position(&self) -> Vec2 {
        Vec2::new(self.true_x, self.true_y)
    }

    pub fn estimated_position(&self) -> Vec2 {
        Vec2::new(self.est_x, self.est_y)
    }

    pub fn is_jammed(&self) -> bool {
        self.gps_status.is_jammed()
    }
}

/// Closed time interval `[start, end]` in seconds of simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// True when `t` lies inside the window (both ends inclusive).
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}
