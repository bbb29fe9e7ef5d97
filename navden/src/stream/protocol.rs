//! WebSocket frame protocol.
//!
//! Every frame is a JSON object tagged by its `type` field:
//!
//! | `type`     | Meaning                                              |
//! |------------|------------------------------------------------------|
//! | `start`    | A streamed run began                                 |
//! | `update`   | One telemetry sample (appended to the trajectory)    |
//! | `complete` | Run finished, carries the final metrics              |
//! | `error`    | The backend aborted the run                          |

use serde::{Deserialize, Serialize};

use super::error::StreamError;
use crate::model::{GpsStatus, MissionMetrics, NavigationMode, TrajectoryPoint, Vec2};

/// A decoded WebSocket frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Start(StartFrame),
    Update(UpdateFrame),
    Complete(CompleteFrame),
    Error(ErrorFrame),
}

impl StreamMessage {
    /// The `type` tag of this frame.
    pub fn kind(&self) -> &'static str {
        match self {
            StreamMessage::Start(_) => "start",
            StreamMessage::Update(_) => "update",
            StreamMessage::Complete(_) => "complete",
            StreamMessage::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartFrame {
    pub message: String,
    pub total_duration: f64,
    pub dt: f64,
    pub total_steps: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFrame {
    pub time: f64,
    /// Run progress, 0-100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub step: u64,
    #[serde(default)]
    pub total_steps: u64,
    pub data: UpdateData,
    #[serde(default)]
    pub metrics: LiveMetrics,
}

/// Per-sample telemetry inside an `update` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateData {
    pub true_position: Vec2,
    pub estimated_position: Vec2,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub error: f64,
    #[serde(default)]
    pub gps_status: GpsStatus,
}

/// Running counters carried by each `update` frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveMetrics {
    pub waypoints_reached: u32,
    pub max_error: f64,
    pub total_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleteFrame {
    pub message: String,
    pub final_metrics: MissionMetrics,
    /// Raw per-step records; their shape is backend-specific so they are kept untyped.
    pub trajectory_data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorFrame {
    pub message: String,
}

impl UpdateFrame {
    /// Convert the sample into a trajectory point.
    ///
    /// The frame does not carry a navigation mode, so it is derived from the
    /// GPS status the same way the backend does.
    pub fn to_trajectory_point(&self) -> TrajectoryPoint {
        let nav_mode = if self.data.gps_status.is_jammed() {
            NavigationMode::Sensor
        } else {
            NavigationMode::Gps
        };

        TrajectoryPoint {
            time: self.time,
            true_x: self.data.true_position.x,
            true_y: self.data.true_position.y,
            est_x: self.data.estimated_position.x,
            est_y: self.data.estimated_position.y,
            error: self.data.error,
            confidence: self.data.confidence,
            gps_status: self.data.gps_status,
            nav_mode,
        }
    }
}

/// Parse one text frame.
pub fn parse_message(text: &str) -> Result<StreamMessage, StreamError> {
    serde_json::from_str(text).map_err(|e| StreamError::ParseError(e.to_string()))
}
