//! Mission panel: progress, waypoints, and the metric summaries.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use navden::session::DashboardSession;

use super::primitives::format::{format_meters, format_percent, format_sim_time};
use super::primitives::{ProgressBar, ProgressBarStyle};

const BAR_WIDTH: usize = 20;

/// Widget for the mission panel.
pub struct MissionWidget<'a> {
    session: &'a DashboardSession,
    planned_waypoints: usize,
}

impl<'a> MissionWidget<'a> {
    pub fn new(session: &'a DashboardSession, planned_waypoints: usize) -> Self {
        Self {
            session,
            planned_waypoints,
        }
    }

    fn label(text: &str) -> Span<'static> {
        Span::styled(format!("{:<13}", text), Style::default().fg(Color::DarkGray))
    }

    fn value(text: String) -> Span<'static> {
        Span::styled(text, Style::default().fg(Color::White))
    }

    fn waypoint_line(&self) -> Line<'static> {
        let reached = self
            .session
            .metrics()
            .map(|m| m.waypoints_reached)
            .unwrap_or(self.session.live().waypoints_reached);
        let total = self
            .session
            .metrics()
            .map(|m| m.total_waypoints as usize)
            .filter(|&t| t > 0)
            .unwrap_or(self.planned_waypoints);

        let mut spans = vec![Self::label("Waypoints:")];
        spans.extend(
            ProgressBar::new(f64::from(reached), total as f64, BAR_WIDTH)
                .filled_color(Color::Green)
                .to_spans(),
        );
        spans.push(Self::value(format!(" {}/{}", reached, total)));
        Line::from(spans)
    }
}

impl Widget for MissionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let mut lines = Vec::new();

        let mut progress = vec![Self::label("Progress:")];
        progress.extend(
            ProgressBar::percent(session.progress(), BAR_WIDTH)
                .bar_style(ProgressBarStyle::Fractional)
                .filled_color(Color::Cyan)
                .to_spans(),
        );
        progress.push(Self::value(format!(
            " {}",
            format_percent(session.progress(), 1)
        )));
        lines.push(Line::from(progress));
        lines.push(self.waypoint_line());

        let steps = if session.total_steps() > 0 {
            format!("{}/{}", session.step(), session.total_steps())
        } else {
            session.step().to_string()
        };
        lines.push(Line::from(vec![
            Self::label("Sim time:"),
            Self::value(format!("{}  step {}", format_sim_time(session.sim_time()), steps)),
        ]));
        lines.push(Line::from(vec![
            Self::label("Max error:"),
            Self::value(format_meters(session.live().max_error)),
            Span::styled("   Distance: ", Style::default().fg(Color::DarkGray)),
            Self::value(format_meters(session.live().total_distance)),
        ]));

        if let Some(metrics) = session.metrics() {
            lines.push(Line::from(vec![
                Self::label("Final:"),
                Span::styled(
                    format!(
                        "success {}  confidence {}",
                        format_percent(metrics.mission_success_rate, 1),
                        format_percent(metrics.final_confidence, 1)
                    ),
                    Style::default().fg(Color::Green),
                ),
            ]));
        }

        if let Some(analysis) = session.analysis() {
            lines.push(Line::from(vec![
                Self::label("Jamming:"),
                Span::styled(
                    format!(
                        "{:.1}s-{:.1}s  peak {}  x{:.2}",
                        analysis.jam_start_time,
                        analysis.jam_end_time,
                        format_meters(analysis.peak_error_during_jam),
                        analysis.error_increase_factor
                    ),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navden::model::{JammingAnalysis, MissionMetrics};
    use navden::session::SessionSource;

    fn render(widget: MissionWidget, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_planned_waypoints_before_metrics() {
        let session = DashboardSession::new(SessionSource::Demo);
        let text = render(MissionWidget::new(&session, 4), 60, 6);
        assert!(text.contains("0/4"));
        assert!(!text.contains("Final:"));
    }

    #[test]
    fn test_final_metrics_and_analysis() {
        let mut session = DashboardSession::new(SessionSource::Backend);
        session.set_metrics(MissionMetrics {
            waypoints_reached: 5,
            total_waypoints: 5,
            mission_success_rate: 100.0,
            ..Default::default()
        });
        session.set_analysis(JammingAnalysis {
            jam_start_time: 3.0,
            jam_end_time: 6.0,
            ..Default::default()
        });
        let text = render(MissionWidget::new(&session, 0), 70, 8);
        assert!(text.contains("5/5"));
        assert!(text.contains("success 100.0%"));
        assert!(text.contains("3.0s-6.0s"));
    }
}
