//! Toast overlay for notices

use super::dialog::wrap_text;
use crate::state::{Notice, Severity};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TOAST_WIDTH: u16 = 44;

/// Render a notice in the top-right corner of `area`
pub fn render_toast(frame: &mut Frame, area: Rect, notice: &Notice) {
    let (color, icon) = match notice.severity {
        Severity::Success => (Color::Green, "✓"),
        Severity::Warning => (Color::Yellow, "!"),
        Severity::Error => (Color::Red, "✗"),
    };

    let width = TOAST_WIDTH.min(area.width);
    let lines = wrap_text(&notice.message, width.saturating_sub(4) as usize);
    let height = (lines.len() as u16 + 3).min(area.height);

    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height,
    };

    let mut content = vec![Line::from(vec![
        Span::styled(format!("{icon} "), Style::default().fg(color)),
        Span::styled(
            notice.title.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];
    content.extend(lines.into_iter().map(Line::from));

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(toast, toast_area);
}
