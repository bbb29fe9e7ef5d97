//! Progress bar primitive.
//!
//! Horizontal bar built from Unicode block characters. The header uses the
//! fractional style for mission progress; the mission panel uses plain
//! blocks for waypoints reached.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Partial block characters, from empty to full (8x resolution).
const EIGHTHS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Progress bar visual style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressBarStyle {
    /// █ for filled, ░ for empty.
    #[default]
    Block,
    /// Sub-character precision using ▏▎▍▌▋▊▉█.
    Fractional,
}

/// A progress bar widget.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    current: f64,
    max: f64,
    width: usize,
    style: ProgressBarStyle,
    filled_style: Style,
    empty_style: Style,
}

impl ProgressBar {
    /// Create a bar showing `current` out of `max`, `width` characters wide.
    pub fn new(current: f64, max: f64, width: usize) -> Self {
        Self {
            current,
            max,
            width,
            style: ProgressBarStyle::default(),
            filled_style: Style::default(),
            empty_style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Bar for a percentage in `[0, 100]`.
    pub fn percent(percent: f64, width: usize) -> Self {
        Self::new(percent, 100.0, width)
    }

    pub fn bar_style(mut self, style: ProgressBarStyle) -> Self {
        self.style = style;
        self
    }

    pub fn filled_color(mut self, color: Color) -> Self {
        self.filled_style = self.filled_style.fg(color);
        self
    }

    /// Fill ratio in `[0, 1]`. A non-positive max reads as empty.
    fn ratio(&self) -> f64 {
        if self.max <= 0.0 || !self.current.is_finite() {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Filled and empty parts of the bar.
    fn parts(&self) -> (String, String) {
        let ratio = self.ratio();
        match self.style {
            ProgressBarStyle::Block => {
                let filled = ((ratio * self.width as f64).round() as usize).min(self.width);
                (
                    "█".repeat(filled),
                    "░".repeat(self.width.saturating_sub(filled)),
                )
            }
            ProgressBarStyle::Fractional => {
                let total_eighths = (ratio * (self.width * 8) as f64) as usize;
                let full = (total_eighths / 8).min(self.width);
                let remainder = total_eighths % 8;

                let mut filled = "█".repeat(full);
                if full < self.width && remainder > 0 {
                    filled.push(EIGHTHS[remainder]);
                }
                let used = filled.chars().count();
                (filled, "░".repeat(self.width.saturating_sub(used)))
            }
        }
    }

    /// Render as plain text.
    pub fn render_string(&self) -> String {
        let (filled, empty) = self.parts();
        filled + &empty
    }

    /// Spans for embedding in a larger line.
    pub fn to_spans(&self) -> Vec<Span<'static>> {
        let (filled, empty) = self.parts();
        vec![
            Span::styled(filled, self.filled_style),
            Span::styled(empty, self.empty_style),
        ]
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        Paragraph::new(Line::from(self.to_spans())).render(Rect { height: 1, ..area }, buf);
    }
}
