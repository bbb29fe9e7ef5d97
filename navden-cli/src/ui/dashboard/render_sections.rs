//! Panel chrome shared by the dashboard sections.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::{Severity, StatusMessage};

/// Draw a titled panel border and return the area inside it.
pub fn render_panel(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(format!(" {} ", title), Style::default().fg(color)));
    frame.render_widget(block, area);
    inner_rect(area, 1, 1)
}

/// Centered placeholder for panels with nothing to plot yet.
pub fn render_placeholder(frame: &mut Frame, area: Rect) {
    let y = area.y + area.height / 2;
    let line_area = Rect {
        y,
        height: area.height.min(1),
        ..area
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "No data available",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, line_area);
}

/// Bottom status line: the last error, or what the feed is doing.
pub fn render_status_line(frame: &mut Frame, area: Rect, status: &StatusMessage) {
    let color = match status.severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled(" ● ", Style::default().fg(color)),
        Span::styled(status.text.clone(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

pub fn inner_rect(area: Rect, margin_x: u16, margin_y: u16) -> Rect {
    Rect {
        x: area.x + margin_x,
        y: area.y + margin_y,
        width: area.width.saturating_sub(margin_x * 2),
        height: area.height.saturating_sub(margin_y * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_rect() {
        let inner = inner_rect(Rect::new(2, 3, 10, 6), 1, 1);
        assert_eq!(inner, Rect::new(3, 4, 8, 4));
    }

    #[test]
    fn test_inner_rect_saturates() {
        let inner = inner_rect(Rect::new(0, 0, 1, 1), 1, 1);
        assert_eq!(inner.width, 0);
        assert_eq!(inner.height, 0);
    }
}
