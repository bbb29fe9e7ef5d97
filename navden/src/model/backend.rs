//! Payloads returned by the backend's service and simulation endpoints.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use super::metrics::{JammingAnalysis, MissionMetrics};
use super::state::{NavigationMode, NavigationState};
use super::trajectory::TrajectoryPoint;
use super::vec2::Vec2;

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// `GET /info`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendInfo {
    pub service: String,
    pub version: String,
    pub capabilities: Vec<String>,
    pub algorithms: Vec<String>,
    pub sensors_simulated: Vec<String>,
}

/// Request body for `POST /run-simulation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Simulated duration in seconds.
    pub duration: f64,
    /// Integration step in seconds.
    pub dt: f64,
}

/// Longest run the backend accepts, in seconds.
pub const MAX_SIMULATION_DURATION: f64 = 300.0;

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            duration: 90.0,
            dt: 0.1,
        }
    }
}

impl SimulationRequest {
    pub fn new(duration: f64, dt: f64) -> Self {
        Self { duration, dt }
    }

    /// Check the request against the backend's own limits.
    ///
    /// Returns the message the backend would answer with.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.duration > 0.0) {
            return Err("Duration must be positive".to_string());
        }
        if self.duration > MAX_SIMULATION_DURATION {
            return Err(format!(
                "Duration cannot exceed {} seconds",
                MAX_SIMULATION_DURATION
            ));
        }
        if !(self.dt > 0.0) {
            return Err("Time step must be positive".to_string());
        }
        Ok(())
    }
}

/// Mission bookkeeping attached to a full simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionStatus {
    pub current_time: f64,
    pub mission_active: bool,
    pub mission_complete: bool,
    pub current_waypoint: Vec2,
    pub current_waypoint_index: u32,
    pub waypoints_reached: u32,
    pub total_waypoints: u32,
    pub gps_jammed: bool,
    pub navigation_mode: NavigationMode,
    /// Fraction 0-1 (unlike the percentage in [`MissionMetrics`]).
    pub mission_progress: f64,
    pub jamming_active: bool,
}

/// `POST /run-simulation`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationResults {
    /// `"success"` when the mission completed, `"running"` otherwise.
    pub status: String,
    pub trajectory_data: Vec<TrajectoryPoint>,
    pub metrics: MissionMetrics,
    pub jamming_analysis: JammingAnalysis,
    #[serde(deserialize_with = "empty_object_as_none")]
    pub current_state: Option<NavigationState>,
    pub mission_status: Option<MissionStatus>,
}

impl SimulationResults {
    pub fn is_complete(&self) -> bool {
        self.status == "success"
    }
}

/// `GET /current-state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentState {
    #[serde(default)]
    pub time: f64,
    pub state: NavigationState,
}

/// `GET /trajectory?limit=N`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryPage {
    pub total_points: usize,
    pub returned_points: usize,
    pub trajectory: Vec<TrajectoryPoint>,
}

/// Short metric block returned alongside a single step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepMetrics {
    pub mission_progress: f64,
    pub waypoints_reached: u32,
    pub gps_jammed: bool,
}

/// `POST /step-simulation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    #[serde(default)]
    pub time: f64,
    pub state: NavigationState,
    #[serde(default)]
    pub metrics: StepMetrics,
}

/// `POST /reset`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetResult {
    pub message: String,
    /// A freshly reset simulator has not stepped yet and reports `{}`.
    #[serde(deserialize_with = "empty_object_as_none")]
    pub state: Option<NavigationState>,
}

/// Treat `null` and `{}` as absent, otherwise decode `T`.
pub(crate) fn empty_object_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(ref map) if map.is_empty() => Ok(None),
        other => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation_messages() {
        assert_eq!(
            SimulationRequest::new(0.0, 0.1).validate().unwrap_err(),
            "Duration must be positive"
        );
        assert_eq!(
            SimulationRequest::new(301.0, 0.1).validate().unwrap_err(),
            "Duration cannot exceed 300 seconds"
        );
        assert_eq!(
            SimulationRequest::new(30.0, 0.0).validate().unwrap_err(),
            "Time step must be positive"
        );
        assert!(SimulationRequest::new(300.0, 0.1).validate().is_ok());
        assert!(SimulationRequest::new(f64::NAN, 0.1).validate().is_err());
    }

    #[test]
    fn test_reset_with_empty_state() {
        let json = r#"{"success": true, "message": "Simulator reset", "state": {}}"#;
        let reset: ResetResult = serde_json::from_str(json).unwrap();
        assert_eq!(reset.message, "Simulator reset");
        assert!(reset.state.is_none());
    }

    #[test]
    fn test_simulation_results() {
        let json = r#"{
            "status": "running",
            "trajectory_data": [
                {"time": 0.0, "true_x": 0.0, "true_y": 0.0, "est_x": 0.1, "est_y": 0.0,
                 "error": 0.1, "confidence": 99.0, "gps_status": "ACTIVE", "nav_mode": "GPS"}
            ],
            "metrics": {"waypoints_reached": 1, "total_waypoints": 5},
            "jamming_analysis": {"jam_start_time": 3.0, "jam_end_time": 6.0},
            "current_state": {
                "true_position": [0.0, 0.0], "estimated_position": [0.1, 0.0],
                "velocity": [0.0, 0.0], "heading": 0.0, "altitude": 5.0,
                "gps_available": true, "navigation_mode": "GPS", "error": 0.1,
                "confidence": 99.0, "current_waypoint": [20.0, 10.0], "mission_progress": 0.0
            },
            "mission_status": {"mission_active": true, "current_waypoint": [20.0, 10.0, 5.0]}
        }"#;

        let results: SimulationResults = serde_json::from_str(json).unwrap();
        assert!(!results.is_complete());
        assert_eq!(results.trajectory_data.len(), 1);
        assert_eq!(results.metrics.total_waypoints, 5);
        assert_eq!(results.jamming_analysis.jam_end_time, 6.0);
        assert!(results.current_state.is_some());
        let status = results.mission_status.unwrap();
        assert_eq!(status.current_waypoint, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn test_health() {
        let health: HealthStatus = serde_json::from_str(
            r#"{"status": "healthy", "service": "NAVDEN Navigation Engine", "version": "1.0.0"}"#,
        )
        .unwrap();
        assert!(health.is_healthy());
    }
}
