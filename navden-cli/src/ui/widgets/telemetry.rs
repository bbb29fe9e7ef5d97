//! Live telemetry panel.
//!
//! Shows the latest navigation state with error and confidence sparklines.
//! [`TelemetryHistory`] follows the session trajectory so each sample is
//! pushed into the sparklines exactly once.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use navden::model::NavigationMode;
use navden::session::{ConnectionStatus, DashboardSession};

use super::primitives::format::format_meters;
use super::primitives::{format::format_percent, SparklineHistory};

/// Sparkline width in characters.
const SPARKLINE_WIDTH: usize = 24;

/// Rolling error and confidence history.
#[derive(Debug, Clone)]
pub struct TelemetryHistory {
    error: SparklineHistory,
    confidence: SparklineHistory,
    /// Trajectory length seen at the last update.
    seen: usize,
}

impl TelemetryHistory {
    pub fn new(max_samples: usize) -> Self {
        Self {
            error: SparklineHistory::new(max_samples),
            confidence: SparklineHistory::new(max_samples),
            seen: 0,
        }
    }

    /// Push samples added to the session since the previous call.
    ///
    /// A shorter trajectory means a new run started, so history restarts.
    pub fn update(&mut self, session: &DashboardSession) {
        let trajectory = session.trajectory();
        if trajectory.len() < self.seen {
            self.error.clear();
            self.confidence.clear();
            self.seen = 0;
        }
        for point in &trajectory[self.seen..] {
            self.error.push(point.error);
            self.confidence.push(point.confidence);
        }
        self.seen = trajectory.len();
    }

    pub fn error(&self) -> &SparklineHistory {
        &self.error
    }

    pub fn confidence(&self) -> &SparklineHistory {
        &self.confidence
    }
}

/// Widget for the live telemetry panel.
pub struct TelemetryWidget<'a> {
    session: &'a DashboardSession,
    history: &'a TelemetryHistory,
}

impl<'a> TelemetryWidget<'a> {
    pub fn new(session: &'a DashboardSession, history: &'a TelemetryHistory) -> Self {
        Self { session, history }
    }

    fn label(text: &str) -> Span<'static> {
        Span::styled(format!("{:<12}", text), Style::default().fg(Color::DarkGray))
    }

    fn connection_line(&self) -> Line<'static> {
        let (indicator, text, color) = match self.session.connection() {
            ConnectionStatus::Idle => ("○", "Idle".to_string(), Color::DarkGray),
            ConnectionStatus::Connected => ("●", "Connected".to_string(), Color::Green),
            ConnectionStatus::Closed(None) => ("●", "Closed".to_string(), Color::Yellow),
            ConnectionStatus::Closed(Some(reason)) => {
                ("●", format!("Closed ({})", reason), Color::Yellow)
            }
        };
        let mut spans = vec![
            Self::label("Link:"),
            Span::styled(format!("{} ", indicator), Style::default().fg(color)),
            Span::styled(text, Style::default().fg(color)),
        ];
        if self.session.malformed_frames() > 0 {
            spans.push(Span::styled(
                format!("  {} malformed", self.session.malformed_frames()),
                Style::default().fg(Color::Red),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for TelemetryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(state) = self.session.state() else {
            let lines = vec![
                self.connection_line(),
                Line::from(Span::styled(
                    "No data available",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            Paragraph::new(lines).render(area, buf);
            return;
        };

        let (gps_text, gps_color) = if state.gps_available {
            ("ACTIVE", Color::Green)
        } else {
            ("JAMMED", Color::Red)
        };
        let mode_color = match state.navigation_mode {
            NavigationMode::Gps => Color::Green,
            NavigationMode::Sensor => Color::Yellow,
            NavigationMode::Other(_) => Color::Cyan,
        };

        let error_color = if state.error > 5.0 {
            Color::Red
        } else if state.error > 2.0 {
            Color::Yellow
        } else {
            Color::Green
        };

        let lines = vec![
            Line::from(vec![
                Self::label("GPS:"),
                Span::styled(
                    format!("● {}", gps_text),
                    Style::default().fg(gps_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Mode: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    state.navigation_mode.to_string(),
                    Style::default().fg(mode_color),
                ),
            ]),
            Line::from(vec![
                Self::label("True:"),
                Span::styled(
                    format!(
                        "({:>8.2}, {:>8.2})",
                        state.true_position.x, state.true_position.y
                    ),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Self::label("Estimated:"),
                Span::styled(
                    format!(
                        "({:>8.2}, {:>8.2})",
                        state.estimated_position.x, state.estimated_position.y
                    ),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(vec![
                Self::label("Error:"),
                Span::styled(
                    format!("{:>10} ", format_meters(state.error)),
                    Style::default().fg(error_color),
                ),
                Span::styled(
                    self.history.error().render(SPARKLINE_WIDTH, None),
                    Style::default().fg(Color::Red),
                ),
            ]),
            Line::from(vec![
                Self::label("Confidence:"),
                Span::styled(
                    format!("{:>10} ", format_percent(state.confidence, 1)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    self.history.confidence().render(SPARKLINE_WIDTH, Some(100.0)),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(vec![
                Self::label("Speed:"),
                Span::styled(
                    format!(
                        "{:.2} m/s  heading {:.0}°",
                        state.speed(),
                        state.heading.to_degrees()
                    ),
                    Style::default().fg(Color::White),
                ),
            ]),
            self.connection_line(),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}
