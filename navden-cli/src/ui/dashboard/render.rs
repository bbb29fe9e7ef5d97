//! Main dashboard rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (3 lines)                                        │
//! ├──────────────────────────────────┬──────────────────────┤
//! │ Flight Path                      │ Telemetry            │
//! │                                  ├──────────────────────┤
//! │                                  │ Mission              │
//! ├──────────────────────────────────┼──────────────────────┤
//! │ Position Error                   │ Confidence           │
//! ├──────────────────────────────────┴──────────────────────┤
//! │ Status line                                             │
//! └─────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use navden::session::DashboardSession;

use super::render_sections::{render_panel, render_placeholder, render_status_line};
use super::state::{status_message, DashboardConfig};
use crate::ui::widgets::primitives::format::{format_duration_compact, format_sim_time};
use crate::ui::widgets::primitives::{ProgressBar, ProgressBarStyle};
use crate::ui::widgets::{
    MissionWidget, PathChart, SeriesKind, TelemetryHistory, TelemetryWidget, TimeSeriesChart,
};

/// Everything one frame needs besides the session.
pub struct RenderContext<'a> {
    pub config: &'a DashboardConfig,
    pub history: &'a TelemetryHistory,
    pub uptime: Duration,
    pub spinner: Option<char>,
    pub confirmation_remaining: Option<Duration>,
}

/// Render the dashboard to the frame.
pub fn render_ui(frame: &mut Frame, session: &DashboardSession, ctx: &RenderContext) {
    let size = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header
            Constraint::Percentage(55),  // Path + side panels
            Constraint::Min(8),          // Time-series charts
            Constraint::Length(1),       // Status line
        ])
        .split(size);

    render_header(frame, rows[0], session, ctx);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let path_inner = render_panel(frame, middle[0], "Flight Path", Color::Magenta);
    if session.has_data() || !ctx.config.waypoints.is_empty() {
        frame.render_widget(
            PathChart::new(session.trajectory(), &ctx.config.waypoints),
            path_inner,
        );
    } else {
        render_placeholder(frame, path_inner);
    }

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(4)])
        .split(middle[1]);

    let telemetry_inner = render_panel(frame, side[0], "Telemetry", Color::Cyan);
    frame.render_widget(TelemetryWidget::new(session, ctx.history), telemetry_inner);

    let mission_inner = render_panel(frame, side[1], "Mission", Color::Blue);
    frame.render_widget(
        MissionWidget::new(session, ctx.config.waypoints.len()),
        mission_inner,
    );

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    for (area, kind, title, color) in [
        (bottom[0], SeriesKind::Error, "Position Error (m)", Color::Red),
        (bottom[1], SeriesKind::Confidence, "Confidence (%)", Color::Magenta),
    ] {
        let inner = render_panel(frame, area, title, color);
        if session.has_data() {
            frame.render_widget(
                TimeSeriesChart::new(session.trajectory(), kind)
                    .with_scheduled_jamming(ctx.config.jamming),
                inner,
            );
        } else {
            render_placeholder(frame, inner);
        }
    }

    render_status_line(frame, rows[3], &status_message(session));

    if let Some(remaining) = ctx.confirmation_remaining {
        render_quit_confirmation(frame, size, remaining);
    }
}

/// Render the header bar with feed, progress and key hints.
fn render_header(frame: &mut Frame, area: Rect, session: &DashboardSession, ctx: &RenderContext) {
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" NAVDEN {} ", navden::VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left);

    let mut spans = Vec::new();
    if let Some(spinner) = ctx.spinner {
        spans.push(Span::styled(
            format!("{} ", spinner),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        ctx.config.feed.clone(),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    spans.extend(
        ProgressBar::percent(session.progress(), 16)
            .bar_style(ProgressBarStyle::Fractional)
            .filled_color(Color::Cyan)
            .to_spans(),
    );
    spans.push(Span::styled(
        format!(" {:>5.1}%", session.progress()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled("  │  Sim: ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format_sim_time(session.sim_time()),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled("  │  Uptime: ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        format_duration_compact(ctx.uptime),
        Style::default().fg(Color::White),
    ));
    spans.push(Span::styled("  │  Press ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(" to quit", Style::default().fg(Color::DarkGray)));
    if session.is_running() {
        spans.push(Span::styled(", ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(" to stop", Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(header_block)
        .alignment(Alignment::Right);
    frame.render_widget(header, area);
}

/// Render the quit confirmation overlay banner.
fn render_quit_confirmation(frame: &mut Frame, area: Rect, remaining: Duration) {
    let banner_width = 50u16;
    let banner_height = 4u16;
    let banner_area = Rect {
        x: area.x + (area.width.saturating_sub(banner_width)) / 2,
        y: area.y + 4,
        width: banner_width.min(area.width),
        height: banner_height.min(area.height.saturating_sub(4)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black))
        .title(Span::styled(
            " Confirm Quit ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let text = vec![
        Line::from(Span::styled(
            "The live feed will be closed.",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(vec![
            Span::raw("Press "),
            key("y", Color::Green),
            Span::raw(" or "),
            key("q", Color::Green),
            Span::raw(" to quit, "),
            key("n", Color::Cyan),
            Span::raw(" to cancel"),
            Span::styled(
                format!("  ({}s)", remaining.as_secs()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    frame.render_widget(ratatui::widgets::Clear, banner_area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        banner_area,
    );
}
