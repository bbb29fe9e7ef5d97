//! Dashboard session: the single owner of everything the UI displays.
//!
//! Stream frames, demo frames and REST snapshots are all folded into a
//! [`DashboardSession`]. The session is plain data; the dashboard loop owns
//! it and applies updates between draws, so no locking is needed.

use crate::charts;
use crate::client::PollEvent;
use crate::demo::DemoFrame;
use crate::model::{
    JammingAnalysis, MissionMetrics, NavigationMode, NavigationState, SimulationResults,
    TrajectoryPoint,
};
use crate::stream::{LiveMetrics, StreamEvent, StreamMessage, UpdateFrame};

/// Where the session's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSource {
    /// REST snapshots.
    #[default]
    Backend,
    /// The `/ws` stream.
    Stream,
    /// The local guidance demo.
    Demo,
}

/// State of the live feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Idle,
    Connected,
    /// Feed ended; carries the reason if one was given.
    Closed(Option<String>),
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    source: SessionSource,
    trajectory: Vec<TrajectoryPoint>,
    state: Option<NavigationState>,
    live: LiveMetrics,
    metrics: Option<MissionMetrics>,
    analysis: Option<JammingAnalysis>,
    sim_time: f64,
    progress: f64,
    step: u64,
    total_steps: u64,
    running: bool,
    connection: ConnectionStatus,
    last_error: Option<String>,
    malformed_frames: u64,
}

impl DashboardSession {
    pub fn new(source: SessionSource) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Fold one adapter event into the session.
    pub fn apply_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Connected { .. } => {
                self.connection = ConnectionStatus::Connected;
            }
            StreamEvent::Message(message) => self.apply(message),
            StreamEvent::Malformed(reason) => {
                self.malformed_frames += 1;
                self.last_error = Some(format!("Malformed frame: {}", reason));
            }
            StreamEvent::Closed(reason) => {
                if let Some(reason) = &reason {
                    self.last_error = Some(reason.clone());
                }
                self.running = false;
                self.connection = ConnectionStatus::Closed(reason);
            }
        }
    }

    /// Fold one decoded stream frame into the session.
    ///
    /// - `start` clears the previous run and raises the running flag
    /// - `update` appends one sample
    /// - `complete` stores the final metrics and lowers the running flag
    /// - `error` records the message and lowers the running flag
    pub fn apply(&mut self, message: StreamMessage) {
        match message {
            StreamMessage::Start(start) => {
                self.clear_run();
                self.total_steps = start.total_steps;
                self.running = true;
            }
            StreamMessage::Update(update) => self.apply_update(&update),
            StreamMessage::Complete(complete) => {
                self.metrics = Some(complete.final_metrics);
                self.progress = 100.0;
                self.running = false;
            }
            StreamMessage::Error(error) => {
                self.last_error = Some(error.message);
                self.running = false;
            }
        }
    }

    fn apply_update(&mut self, update: &UpdateFrame) {
        let point = update.to_trajectory_point();
        let previous = self.state.take();

        self.state = Some(NavigationState {
            true_position: update.data.true_position,
            estimated_position: update.data.estimated_position,
            velocity: previous.as_ref().map(|s| s.velocity).unwrap_or_default(),
            heading: previous.as_ref().map(|s| s.heading).unwrap_or_default(),
            altitude: previous.as_ref().map(|s| s.altitude).unwrap_or_default(),
            error: update.data.error,
            confidence: update.data.confidence,
            gps_available: !update.data.gps_status.is_jammed(),
            navigation_mode: point.nav_mode.clone(),
            current_waypoint: previous
                .as_ref()
                .map(|s| s.current_waypoint)
                .unwrap_or_default(),
            mission_progress: update.progress,
        });

        self.live = update.metrics.clone();
        self.sim_time = update.time;
        self.progress = update.progress;
        self.step = update.step;
        if update.total_steps > 0 {
            self.total_steps = update.total_steps;
        }
        // A stream that skipped `start` is still a live run.
        self.running = true;
        self.trajectory.push(point);
    }

    /// Fold one demo tick into the session.
    pub fn apply_demo_frame(&mut self, frame: &DemoFrame) {
        if frame.step == 1 {
            self.clear_run();
        }
        self.trajectory.push(frame.to_trajectory_point());
        self.state = Some(frame.to_navigation_state());
        self.live.waypoints_reached = frame.waypoints_reached;
        self.live.max_error = self.live.max_error.max(frame.drift);
        self.live.total_distance += frame.true_velocity.length() * (frame.time - self.sim_time);
        self.sim_time = frame.time;
        self.step = frame.step;
        self.progress = frame.progress();
        self.running = !frame.finished;

        if frame.finished {
            self.metrics = Some(MissionMetrics {
                waypoints_reached: frame.waypoints_reached,
                total_waypoints: frame.total_waypoints,
                mission_progress: frame.progress(),
                mission_success_rate: frame.progress(),
                max_position_error: self.live.max_error,
                final_confidence: frame.confidence,
                total_distance: self.live.total_distance,
                current_time: frame.time,
                gps_jammed: frame.is_jammed(),
                navigation_mode: self.navigation_mode(),
            });
            self.analysis = charts::jamming_windows(&self.trajectory)
                .first()
                .map(|window| charts::analyze_jamming(&self.trajectory, *window));
        }
    }

    /// Fold one REST poll result into the session.
    ///
    /// - `Results` replaces the session with a completed run
    /// - `Snapshot` overwrites whatever the backend could serve and clears
    ///   the last error
    /// - `Failed` records the error and keeps the previous data
    pub fn apply_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::Results(results) => {
                self.connection = ConnectionStatus::Connected;
                self.load_results(*results);
            }
            PollEvent::Snapshot(snapshot) => {
                self.connection = ConnectionStatus::Connected;
                self.last_error = None;
                let snapshot = *snapshot;
                if let Some(current) = snapshot.state {
                    self.set_state(current.time, current.state);
                }
                self.replace_trajectory(snapshot.trajectory);
                if let Some(metrics) = snapshot.metrics {
                    self.set_metrics(metrics);
                }
                if let Some(analysis) = snapshot.analysis {
                    self.set_analysis(analysis);
                }
            }
            PollEvent::Failed(message) => self.record_error(message),
        }
    }

    /// Replace everything with a completed REST run.
    pub fn load_results(&mut self, results: SimulationResults) {
        self.clear_run();
        self.sim_time = results
            .trajectory_data
            .last()
            .map(|p| p.time)
            .unwrap_or_default();
        self.trajectory = results.trajectory_data;
        self.state = results.current_state;
        self.progress = results.metrics.mission_progress;
        self.metrics = Some(results.metrics);
        self.analysis = Some(results.jamming_analysis);
        self.running = false;
    }

    pub fn set_state(&mut self, time: f64, state: NavigationState) {
        self.sim_time = time;
        self.progress = state.mission_progress;
        self.state = Some(state);
    }

    pub fn set_metrics(&mut self, metrics: MissionMetrics) {
        self.metrics = Some(metrics);
    }

    pub fn set_analysis(&mut self, analysis: JammingAnalysis) {
        self.analysis = Some(analysis);
    }

    pub fn replace_trajectory(&mut self, trajectory: Vec<TrajectoryPoint>) {
        self.trajectory = trajectory;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Forget all run data but keep the source and connection status.
    pub fn reset(&mut self) {
        self.clear_run();
        self.running = false;
    }

    fn clear_run(&mut self) {
        self.trajectory.clear();
        self.state = None;
        self.live = LiveMetrics::default();
        self.metrics = None;
        self.analysis = None;
        self.sim_time = 0.0;
        self.progress = 0.0;
        self.step = 0;
        self.total_steps = 0;
        self.last_error = None;
    }

    pub fn source(&self) -> SessionSource {
        self.source
    }

    pub fn trajectory(&self) -> &[TrajectoryPoint] {
        &self.trajectory
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    pub fn live(&self) -> &LiveMetrics {
        &self.live
    }

    pub fn metrics(&self) -> Option<&MissionMetrics> {
        self.metrics.as_ref()
    }

    pub fn analysis(&self) -> Option<&JammingAnalysis> {
        self.analysis.as_ref()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Run progress, 0-100.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn connection(&self) -> &ConnectionStatus {
        &self.connection
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn malformed_frames(&self) -> u64 {
        self.malformed_frames
    }

    pub fn has_data(&self) -> bool {
        !self.trajectory.is_empty()
    }

    /// True when the newest sample was taken without GPS.
    pub fn is_jammed(&self) -> bool {
        self.trajectory.last().is_some_and(|p| p.is_jammed())
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        self.state
            .as_ref()
            .map(|s| s.navigation_mode.clone())
            .unwrap_or_default()
    }
}
