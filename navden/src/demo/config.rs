//! Demo loop parameters.

use std::time::Duration;

use crate::config::defaults::{
    DEFAULT_JAM_END, DEFAULT_JAM_START, DEFAULT_MEASUREMENT_NOISE, DEFAULT_PROCESS_NOISE,
};
use crate::config::ConfigFile;
use crate::model::{TimeWindow, Vec2};

use super::{
    DEFAULT_ARRIVAL_THRESHOLD, DEFAULT_BLEND, DEFAULT_DT, DEFAULT_GAIN, DEFAULT_MAX_DURATION,
    DEFAULT_TICK_MS,
};

/// Default launch point on the 800×600 planning canvas.
pub const DEFAULT_START: Vec2 = Vec2::new(200.0, 300.0);

/// Default demo route: a loop around the canvas.
pub fn default_waypoints() -> Vec<Vec2> {
    vec![
        Vec2::new(500.0, 150.0),
        Vec2::new(700.0, 400.0),
        Vec2::new(400.0, 550.0),
        Vec2::new(150.0, 450.0),
    ]
}

/// Parameters of one demo run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub dt: f64,
    pub gain: f64,
    pub arrival_threshold: f64,
    pub blend: f64,
    /// GPS noise half-width (R).
    pub gps_noise: f64,
    /// IMU noise half-width (Q).
    pub imu_noise: f64,
    /// `None` means GPS is always available.
    pub jamming: Option<TimeWindow>,
    pub start: Vec2,
    /// Simulated seconds after which the run stops.
    pub max_duration: f64,
    pub tick: Duration,
    pub seed: Option<u64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            gain: DEFAULT_GAIN,
            arrival_threshold: DEFAULT_ARRIVAL_THRESHOLD,
            blend: DEFAULT_BLEND,
            gps_noise: DEFAULT_MEASUREMENT_NOISE,
            imu_noise: DEFAULT_PROCESS_NOISE,
            jamming: Some(TimeWindow::new(DEFAULT_JAM_START, DEFAULT_JAM_END)),
            start: DEFAULT_START,
            max_duration: DEFAULT_MAX_DURATION,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
        }
    }
}

impl DemoConfig {
    /// Build from the `[demo]`, `[filter]` and `[jamming]` sections.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self {
            dt: config.demo.dt,
            gain: config.demo.gain,
            arrival_threshold: config.demo.arrival_threshold,
            blend: config.demo.blend,
            gps_noise: config.filter.measurement_noise,
            imu_noise: config.filter.process_noise,
            jamming: config.jamming.window(),
            start: DEFAULT_START,
            max_duration: DEFAULT_MAX_DURATION,
            tick: Duration::from_millis(config.demo.tick_ms),
            seed: config.demo.seed,
        }
    }

    pub fn with_start(mut self, start: Vec2) -> Self {
        self.start = start;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_duration(mut self, seconds: f64) -> Self {
        self.max_duration = seconds;
        self
    }

    pub fn with_jamming(mut self, jamming: Option<TimeWindow>) -> Self {
        self.jamming = jamming;
        self
    }

    /// True when GPS is denied at simulated time `t`.
    pub fn is_jammed_at(&self, t: f64) -> bool {
        self.jamming.is_some_and(|window| window.contains(t))
    }
}
