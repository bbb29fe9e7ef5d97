//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::model::TimeWindow;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Backend connection settings
    pub backend: BackendSettings,
    /// Estimator noise parameters (Q and R)
    pub filter: FilterSettings,
    /// GPS jamming schedule
    pub jamming: JammingSettings,
    /// Local guidance demo parameters
    pub demo: DemoSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Backend connection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    /// Base URL of the REST API; the WebSocket endpoint is derived from it.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Default number of samples requested from `/trajectory`.
    pub trajectory_limit: usize,
}

/// Estimator noise configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    /// Process noise Q. Also the IMU noise half-width in the demo.
    pub process_noise: f64,
    /// Measurement noise R. Also the GPS noise half-width in the demo.
    pub measurement_noise: f64,
}

/// GPS jamming schedule, in seconds of simulated time.
#[derive(Debug, Clone, PartialEq)]
pub struct JammingSettings {
    pub enabled: bool,
    pub start: f64,
    pub end: f64,
}

impl JammingSettings {
    /// The jamming window, or `None` when jamming is disabled.
    pub fn window(&self) -> Option<TimeWindow> {
        self.enabled.then(|| TimeWindow::new(self.start, self.end))
    }
}

/// Guidance demo configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    /// Fixed integration step in seconds.
    pub dt: f64,
    /// Guidance gain k.
    pub gain: f64,
    /// Distance below which a waypoint counts as reached.
    pub arrival_threshold: f64,
    /// Correction blend factor K applied when GPS is available.
    pub blend: f64,
    /// Wall-clock interval between ticks, in milliseconds.
    pub tick_ms: u64,
    /// Noise seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
