//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Center a dialog of the given size within `area`, shrinking it to fit
pub fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

/// Clear `area` and draw bordered dialog content over it
pub fn render_dialog_frame(frame: &mut Frame, area: Rect, content: Vec<Line>, border: Color) {
    frame.render_widget(Clear, area);

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::new().bg(Color::Black).fg(Color::White));

    frame.render_widget(dialog, area);
}

/// Key hint line such as "↑↓ select  Enter confirm  Esc cancel"
pub fn hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("Create lead failed: Company name is required", 20);
        assert_eq!(
            lines,
            vec!["Create lead failed:", "Company name is", "required"]
        );
    }

    #[test]
    fn test_wrap_text_keeps_blank_paragraphs() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Acme", 10), "Acme");
        assert_eq!(truncate_string("Umbrella Corporation", 10), "Umbrell...");
        // Multi-byte characters are never split
        assert_eq!(truncate_string("Ünïcödé Gmbh", 6), "Ünï...");
    }

    #[test]
    fn test_centered_area_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let dialog = centered_area(area, 50, 6);
        assert_eq!(dialog, Rect::new(0, 2, 40, 6));
    }
}
