//! Navigation state and the string-tagged enums shared with the backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// GPS receiver status as reported per trajectory sample.
///
/// The backend sends `"JAMMED"` or `"ACTIVE"`. Anything that is not
/// `"JAMMED"` is treated as an active receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GpsStatus {
    #[default]
    Active,
    Jammed,
}

impl GpsStatus {
    pub fn is_jammed(self) -> bool {
        matches!(self, GpsStatus::Jammed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GpsStatus::Active => "ACTIVE",
            GpsStatus::Jammed => "JAMMED",
        }
    }
}

impl From<String> for GpsStatus {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("JAMMED") {
            GpsStatus::Jammed
        } else {
            GpsStatus::Active
        }
    }
}

impl From<GpsStatus> for String {
    fn from(value: GpsStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GpsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Which sensor set the navigation filter is currently trusting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NavigationMode {
    /// GPS-aided navigation.
    #[default]
    Gps,
    /// Sensor-only (dead reckoning + optical flow) while GPS is denied.
    Sensor,
    /// A mode string this client does not know about.
    Other(String),
}

impl NavigationMode {
    pub fn as_str(&self) -> &str {
        match self {
            NavigationMode::Gps => "GPS",
            NavigationMode::Sensor => "SENSOR",
            NavigationMode::Other(s) => s,
        }
    }
}

impl From<String> for NavigationMode {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "GPS" => NavigationMode::Gps,
            "SENSOR" => NavigationMode::Sensor,
            _ => NavigationMode::Other(value),
        }
    }
}

impl From<NavigationMode> for String {
    fn from(value: NavigationMode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Snapshot of the vehicle and filter state produced by the backend.
///
/// Read-only on the client side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub true_position: Vec2,
    pub estimated_position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    /// Heading in radians.
    #[serde(default)]
    pub heading: f64,
    #[serde(default)]
    pub altitude: f64,
    /// Position error in metres.
    #[serde(default)]
    pub error: f64,
    /// Filter confidence, 0-100.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub gps_available: bool,
    #[serde(default)]
    pub navigation_mode: NavigationMode,
    #[serde(default)]
    pub current_waypoint: Vec2,
    /// Mission progress, 0-100.
    #[serde(default)]
    pub mission_progress: f64,
}

impl NavigationState {
    /// Distance between the true and the estimated position.
    pub fn drift(&self) -> f64 {
        self.true_position.distance(self.estimated_position)
    }

    /// Ground speed derived from the velocity vector.
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}
