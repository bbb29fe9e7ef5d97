//! State types for the dashboard.
//!
//! Independent of rendering so they can be tested without a terminal.

use std::time::Duration;

use navden::model::{TimeWindow, Vec2};
use navden::session::{ConnectionStatus, DashboardSession, SessionSource};

/// Events that can occur in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    /// User requested quit (Ctrl+C or confirmed 'q').
    Quit,
    /// User asked to stop the feed ('c') while keeping the view open.
    Cancel,
}

/// Static facts about what the dashboard is showing.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Feed label for the header, e.g. the WebSocket URL or "local demo".
    pub feed: String,
    /// Planned route drawn on the path chart.
    pub waypoints: Vec<Vec2>,
    /// Scheduled jamming window, shown before any jammed sample arrives.
    pub jamming: Option<TimeWindow>,
}

impl DashboardConfig {
    pub fn new(feed: impl Into<String>) -> Self {
        Self {
            feed: feed.into(),
            waypoints: Vec::new(),
            jamming: None,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Vec2>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn with_jamming(mut self, jamming: Option<TimeWindow>) -> Self {
        self.jamming = jamming;
        self
    }
}

/// How loudly the status line should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Text for the bottom status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Pick the status line for the current session.
///
/// The last error wins; otherwise the line describes the feed.
pub fn status_message(session: &DashboardSession) -> StatusMessage {
    if let Some(error) = session.last_error() {
        return StatusMessage::new(error, Severity::Error);
    }

    let feed = match session.source() {
        SessionSource::Stream => "Stream",
        SessionSource::Demo => "Demo",
        SessionSource::Backend => "Backend",
    };

    match session.connection() {
        ConnectionStatus::Closed(_) if session.metrics().is_some() => {
            StatusMessage::new(format!("{} complete", feed), Severity::Info)
        }
        ConnectionStatus::Closed(_) => {
            StatusMessage::new(format!("{} closed", feed), Severity::Warning)
        }
        _ if session.source() == SessionSource::Demo && !session.is_running() => {
            if session.has_data() {
                StatusMessage::new("Demo complete", Severity::Info)
            } else {
                StatusMessage::new("Starting demo...", Severity::Info)
            }
        }
        ConnectionStatus::Idle => StatusMessage::new("Connecting...", Severity::Info),
        ConnectionStatus::Connected if !session.has_data() => {
            if session.source() == SessionSource::Backend {
                StatusMessage::new("Connected, no simulation on the backend yet", Severity::Info)
            } else {
                StatusMessage::new("Connected, waiting for telemetry...", Severity::Info)
            }
        }
        _ if session.is_jammed() => {
            StatusMessage::new("GPS jammed: dead reckoning on IMU", Severity::Warning)
        }
        _ if session.source() == SessionSource::Backend => StatusMessage::new(
            format!("Backend snapshot at t={:.1}s", session.sim_time()),
            Severity::Info,
        ),
        _ => StatusMessage::new(format!("{} running", feed), Severity::Info),
    }
}

/// Timeout for quit confirmation (auto-cancels after this duration).
pub const QUIT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(5);

/// Spinner animation frames.
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
