//! Fixed-timestep guidance and blended-correction loop.

use crate::model::{
    GpsStatus, MissionMetrics, NavigationMode, NavigationState, TrajectoryPoint, Vec2,
};

use super::config::DemoConfig;
use super::guidance::Guidance;
use super::noise::{NoiseSource, UniformNoise};
use super::{CONFIDENCE_DECAY, MIN_CONFIDENCE};

/// Confidence from position drift: `max(5, floor(100 * exp(-0.05 * drift)))`.
///
/// Non-increasing in drift and bounded to `[5, 100]` for any drift >= 0.
pub fn confidence_score(drift: f64) -> f64 {
    (100.0 * (-CONFIDENCE_DECAY * drift.max(0.0)).exp())
        .floor()
        .max(MIN_CONFIDENCE)
}

/// Everything one tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoFrame {
    pub step: u64,
    /// Simulated time at the end of the tick.
    pub time: f64,
    pub true_position: Vec2,
    pub true_velocity: Vec2,
    /// Commanded acceleration (noise-free).
    pub acceleration: Vec2,
    /// Noisy IMU acceleration read.
    pub imu_measurement: Vec2,
    /// IMU-only prediction before correction.
    pub predicted_position: Vec2,
    /// Noisy GPS fix, `None` while jammed.
    pub gps_measurement: Option<Vec2>,
    pub estimated_position: Vec2,
    pub estimated_velocity: Vec2,
    /// Target the vehicle steered toward this tick.
    pub target: Vec2,
    /// Index of the waypoint to pursue next tick.
    pub active_waypoint: usize,
    pub waypoints_reached: u32,
    pub total_waypoints: u32,
    pub drift: f64,
    pub confidence: f64,
    pub finished: bool,
}

impl DemoFrame {
    pub fn is_jammed(&self) -> bool {
        self.gps_measurement.is_none()
    }

    fn gps_status(&self) -> GpsStatus {
        if self.is_jammed() {
            GpsStatus::Jammed
        } else {
            GpsStatus::Active
        }
    }

    fn navigation_mode(&self) -> NavigationMode {
        if self.is_jammed() {
            NavigationMode::Sensor
        } else {
            NavigationMode::Gps
        }
    }

    /// Mission progress, 0-100.
    pub fn progress(&self) -> f64 {
        if self.total_waypoints == 0 {
            return 100.0;
        }
        100.0 * f64::from(self.waypoints_reached) / f64::from(self.total_waypoints)
    }

    pub fn to_trajectory_point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            time: self.time,
            true_x: self.true_position.x,
            true_y: self.true_position.y,
            est_x: self.estimated_position.x,
            est_y: self.estimated_position.y,
            error: self.drift,
            confidence: self.confidence,
            gps_status: self.gps_status(),
            nav_mode: self.navigation_mode(),
        }
    }

    pub fn to_navigation_state(&self) -> NavigationState {
        NavigationState {
            true_position: self.true_position,
            estimated_position: self.estimated_position,
            velocity: self.true_velocity,
            heading: self.true_velocity.heading(),
            altitude: 0.0,
            error: self.drift,
            confidence: self.confidence,
            gps_available: !self.is_jammed(),
            navigation_mode: self.navigation_mode(),
            current_waypoint: self.target,
            mission_progress: self.progress(),
        }
    }
}

/// The toy navigation loop.
///
/// Ground truth and estimate are integrated separately with explicit Euler
/// (`vel += a*dt`, then `pos += vel*dt`). The estimate sees the acceleration
/// only through the noisy IMU and is pulled toward the noisy GPS fix with the
/// blend factor when GPS is available.
pub struct DemoEngine<N: NoiseSource = UniformNoise> {
    config: DemoConfig,
    guidance: Guidance,
    noise: N,
    waypoints: Vec<Vec2>,
    active: usize,
    step: u64,
    time: f64,
    true_position: Vec2,
    true_velocity: Vec2,
    estimated_position: Vec2,
    estimated_velocity: Vec2,
    reached: u32,
    finished: bool,
    distance_travelled: f64,
    max_drift: f64,
    last_confidence: f64,
    last_jammed: bool,
}

impl DemoEngine<UniformNoise> {
    /// Engine with uniform noise seeded from `config.seed`.
    pub fn new(config: DemoConfig, waypoints: Vec<Vec2>) -> Self {
        let noise = UniformNoise::new(config.seed);
        Self::with_noise(config, waypoints, noise)
    }
}

impl<N: NoiseSource> DemoEngine<N> {
    pub fn with_noise(config: DemoConfig, waypoints: Vec<Vec2>, noise: N) -> Self {
        let guidance = Guidance::new(config.gain, config.arrival_threshold);
        let start = config.start;
        let finished = waypoints.is_empty();

        Self {
            config,
            guidance,
            noise,
            waypoints,
            active: 0,
            step: 0,
            time: 0.0,
            true_position: start,
            true_velocity: Vec2::ZERO,
            estimated_position: start,
            estimated_velocity: Vec2::ZERO,
            reached: 0,
            finished,
            distance_travelled: 0.0,
            max_drift: 0.0,
            last_confidence: confidence_score(0.0),
            last_jammed: false,
        }
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn active_waypoint(&self) -> usize {
        self.active
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn true_position(&self) -> Vec2 {
        self.true_position
    }

    pub fn estimated_position(&self) -> Vec2 {
        self.estimated_position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one timestep. Returns `None` once the run has finished.
    pub fn tick(&mut self) -> Option<DemoFrame> {
        if self.finished {
            return None;
        }
        let target = *self.waypoints.get(self.active)?;
        let dt = self.config.dt;

        let command = self.guidance.evaluate(self.true_position, target);
        if command.arrived {
            self.reached += 1;
            if self.active + 1 < self.waypoints.len() {
                self.active += 1;
            } else {
                self.finished = true;
            }
            tracing::debug!(
                waypoint = self.reached,
                time = self.time,
                "Demo waypoint reached"
            );
        }
        let accel = command.acceleration;

        // Ground truth
        let previous = self.true_position;
        self.true_velocity += accel * dt;
        self.true_position += self.true_velocity * dt;
        self.distance_travelled += self.true_position.distance(previous);

        self.step += 1;
        self.time = self.step as f64 * dt;
        if self.time >= self.config.max_duration {
            self.finished = true;
        }

        // Prediction from the noisy IMU
        let imu = accel + self.noise.sample_vec(self.config.imu_noise);
        self.estimated_velocity += imu * dt;
        let predicted = self.estimated_position + self.estimated_velocity * dt;

        // Correction
        let gps = if self.config.is_jammed_at(self.time) {
            None
        } else {
            Some(self.true_position + self.noise.sample_vec(self.config.gps_noise))
        };
        self.estimated_position = match gps {
            Some(fix) => predicted + (fix - predicted) * self.config.blend,
            None => predicted,
        };

        if gps.is_none() != self.last_jammed {
            tracing::info!(time = self.time, jammed = gps.is_none(), "Demo GPS status changed");
            self.last_jammed = gps.is_none();
        }

        let drift = self.true_position.distance(self.estimated_position);
        let confidence = confidence_score(drift);
        self.max_drift = self.max_drift.max(drift);
        self.last_confidence = confidence;

        Some(DemoFrame {
            step: self.step,
            time: self.time,
            true_position: self.true_position,
            true_velocity: self.true_velocity,
            acceleration: accel,
            imu_measurement: imu,
            predicted_position: predicted,
            gps_measurement: gps,
            estimated_position: self.estimated_position,
            estimated_velocity: self.estimated_velocity,
            target,
            active_waypoint: self.active,
            waypoints_reached: self.reached,
            total_waypoints: self.waypoints.len() as u32,
            drift,
            confidence,
            finished: self.finished,
        })
    }

    /// Tick until the run finishes or `max_steps` frames were produced.
    pub fn run_to_completion(&mut self, max_steps: usize) -> Vec<DemoFrame> {
        let mut frames = Vec::new();
        while frames.len() < max_steps {
            match self.tick() {
                Some(frame) => frames.push(frame),
                None => break,
            }
        }
        frames
    }

    /// Mission aggregates so far, in the backend's metric shape.
    pub fn metrics(&self) -> MissionMetrics {
        let total = self.waypoints.len() as u32;
        let progress = if total == 0 {
            100.0
        } else {
            100.0 * f64::from(self.reached) / f64::from(total)
        };

        MissionMetrics {
            waypoints_reached: self.reached,
            total_waypoints: total,
            mission_progress: progress,
            mission_success_rate: progress,
            max_position_error: self.max_drift,
            final_confidence: self.last_confidence,
            total_distance: self.distance_travelled,
            current_time: self.time,
            gps_jammed: self.last_jammed,
            navigation_mode: if self.last_jammed {
                NavigationMode::Sensor
            } else {
                NavigationMode::Gps
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{default_waypoints, ZeroNoise, DEFAULT_BLEND, DEFAULT_START};
    use crate::model::TimeWindow;

    const EPS: f64 = 1e-9;

    /// Adds the same offset to every reading.
    struct ConstantNoise(f64);

    impl NoiseSource for ConstantNoise {
        fn sample(&mut self, _half_width: f64) -> f64 {
            self.0
        }
    }

    fn engine<N: NoiseSource>(noise: N, jamming: Option<TimeWindow>) -> DemoEngine<N> {
        let config = DemoConfig::default().with_jamming(jamming);
        DemoEngine::with_noise(config, default_waypoints(), noise)
    }

    #[test]
    fn test_confidence_bounds_and_monotonic() {
        assert_eq!(confidence_score(0.0), 100.0);
        assert_eq!(confidence_score(1.0), 95.0);
        assert_eq!(confidence_score(1_000.0), 5.0);

        let mut previous = f64::INFINITY;
        for i in 0..2_000 {
            let c = confidence_score(i as f64 * 0.05);
            assert!((5.0..=100.0).contains(&c));
            assert!(c <= previous);
            previous = c;
        }
    }

    #[test]
    fn test_first_tick_accelerates_toward_first_waypoint() {
        let mut engine = engine(ZeroNoise, None);
        let frame = engine.tick().unwrap();

        let expected = Vec2::new(300.0, -150.0).normalize().unwrap() * 4.0;
        assert!((frame.acceleration.x - expected.x).abs() < EPS);
        assert!((frame.acceleration.y - expected.y).abs() < EPS);

        // Euler: velocity first, then position.
        let velocity = expected * 0.05;
        assert!((frame.true_velocity.x - velocity.x).abs() < EPS);
        let position = DEFAULT_START + velocity * 0.05;
        assert!((frame.true_position.x - position.x).abs() < EPS);
        assert!((frame.true_position.y - position.y).abs() < EPS);
    }

    #[test]
    fn test_correction_outside_jamming_window() {
        let mut engine = engine(ConstantNoise(0.7), None);

        for frame in engine.run_to_completion(200) {
            let gps = frame.gps_measurement.unwrap();
            let expected =
                frame.predicted_position + (gps - frame.predicted_position) * DEFAULT_BLEND;
            assert_eq!(frame.estimated_position, expected);
            // Constant offset on the fix.
            assert!((gps.x - (frame.true_position.x + 0.7)).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_noise_estimate_tracks_truth() {
        let mut engine = engine(ZeroNoise, Some(TimeWindow::new(3.0, 6.0)));
        for frame in engine.run_to_completion(300) {
            assert!(frame.drift < EPS, "drift {} at t={}", frame.drift, frame.time);
            assert_eq!(frame.confidence, 100.0);
        }
    }

    #[test]
    fn test_prediction_only_during_jamming() {
        let window = TimeWindow::new(3.0, 6.0);
        let mut engine = engine(ConstantNoise(0.3), Some(window));

        let frames = engine.run_to_completion(200);
        let mut previous: Option<&DemoFrame> = None;
        let mut jammed = 0;

        for frame in &frames {
            if window.contains(frame.time) {
                jammed += 1;
                assert!(frame.is_jammed());
                assert_eq!(frame.estimated_position, frame.predicted_position);

                // Replay the IMU integration from the previous estimate.
                let prev = previous.unwrap();
                let velocity = prev.estimated_velocity + frame.imu_measurement * 0.05;
                let position = prev.estimated_position + velocity * 0.05;
                assert_eq!(frame.estimated_velocity, velocity);
                assert_eq!(frame.estimated_position, position);
            } else {
                assert!(!frame.is_jammed());
            }
            previous = Some(frame);
        }

        // 3.0..=6.0 at dt = 0.05 is 61 ticks, give or take float rounding at the edges.
        assert!((59..=61).contains(&jammed), "jammed ticks: {}", jammed);
    }

    #[test]
    fn test_waypoint_advance_and_halt() {
        let config = DemoConfig::default().with_start(Vec2::new(0.0, 0.0));
        let waypoints = vec![Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0)];
        let mut engine = DemoEngine::with_noise(config, waypoints, ZeroNoise);

        // Both waypoints are inside the threshold from the start.
        let first = engine.tick().unwrap();
        assert_eq!(first.acceleration, Vec2::ZERO);
        assert_eq!(first.waypoints_reached, 1);
        assert_eq!(first.active_waypoint, 1);
        assert!(!first.finished);

        let second = engine.tick().unwrap();
        assert_eq!(second.acceleration, Vec2::ZERO);
        assert_eq!(second.waypoints_reached, 2);
        assert!(second.finished);
        assert_eq!(second.progress(), 100.0);

        assert!(engine.tick().is_none());
        assert!(engine.is_finished());
        assert_eq!(engine.time(), 0.1);
    }

    #[test]
    fn test_default_scene_reaches_first_waypoint() {
        let mut engine = engine(ZeroNoise, Some(TimeWindow::new(3.0, 6.0)));
        let frames = engine.run_to_completion(1_000);

        let arrival = frames
            .iter()
            .find(|frame| frame.waypoints_reached == 1)
            .unwrap();
        assert_eq!(arrival.acceleration, Vec2::ZERO);
        assert_eq!(arrival.active_waypoint, 1);
        assert_eq!(arrival.target, Vec2::new(500.0, 150.0));

        let metrics = engine.metrics();
        assert!(metrics.waypoints_reached >= 1);
        assert_eq!(metrics.total_waypoints, 4);
        assert!(metrics.total_distance > 0.0);
    }

    #[test]
    fn test_run_stops_at_max_duration() {
        let config = DemoConfig::default().with_max_duration(1.0);
        let mut engine = DemoEngine::with_noise(config, default_waypoints(), ZeroNoise);

        let frames = engine.run_to_completion(1_000);
        assert_eq!(frames.len(), 20);
        assert!(frames.last().unwrap().finished);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn test_frame_conversions() {
        let mut engine = engine(ZeroNoise, Some(TimeWindow::new(0.0, 1.0)));
        let frame = engine.tick().unwrap();

        let point = frame.to_trajectory_point();
        assert_eq!(point.gps_status, GpsStatus::Jammed);
        assert_eq!(point.nav_mode, NavigationMode::Sensor);
        assert_eq!(point.true_x, frame.true_position.x);

        let state = frame.to_navigation_state();
        assert!(!state.gps_available);
        assert_eq!(state.current_waypoint, Vec2::new(500.0, 150.0));
        assert_eq!(state.confidence, frame.confidence);
    }

    #[test]
    fn test_empty_route_is_finished() {
        let mut engine = DemoEngine::with_noise(DemoConfig::default(), Vec::new(), ZeroNoise);
        assert!(engine.is_finished());
        assert!(engine.tick().is_none());
    }
}
