//! Mission-level aggregates computed by the backend.

use serde::{Deserialize, Serialize};

use super::state::NavigationMode;

/// Aggregate mission scalars.
///
/// The REST `/metrics` endpoint fills every field; the WebSocket `complete`
/// frame carries only a subset, so missing fields default to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionMetrics {
    pub waypoints_reached: u32,
    pub total_waypoints: u32,
    /// Mission progress, 0-100.
    pub mission_progress: f64,
    /// Success rate, 0-100.
    pub mission_success_rate: f64,
    pub max_position_error: f64,
    pub final_confidence: f64,
    pub total_distance: f64,
    pub current_time: f64,
    pub gps_jammed: bool,
    pub navigation_mode: NavigationMode,
}

impl MissionMetrics {
    /// Waypoints reached as a fraction of the total, or `None` if the total is unknown.
    pub fn waypoint_fraction(&self) -> Option<f64> {
        if self.total_waypoints == 0 {
            None
        } else {
            Some(f64::from(self.waypoints_reached) / f64::from(self.total_waypoints))
        }
    }
}

/// Impact of the GPS jamming period on position error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JammingAnalysis {
    pub jam_start_time: f64,
    pub jam_end_time: f64,
    pub jam_duration: f64,
    /// Mean error before jamming starts.
    pub error_before_jam: f64,
    pub peak_error_during_jam: f64,
    /// Mean error after jamming ends.
    pub error_after_recovery: f64,
    pub recovery_time: f64,
    /// Peak error during the jam divided by the mean error before it.
    pub error_increase_factor: f64,
}
