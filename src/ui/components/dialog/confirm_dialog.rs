//! Confirmation dialog component for destructive actions

use super::base::{centered_area, hint_line, render_dialog_frame, truncate_string};
use crate::state::PendingDeleteAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog for delete action
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let dialog_width = 50u16;
    let dialog_area = centered_area(frame.area(), dialog_width, 10);

    let max_display_len = (dialog_width - 6) as usize;
    let display_text = truncate_string(&action.company, max_display_len);

    let mut content = vec![
        Line::from(Span::styled(
            "Confirm Delete",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Are you sure you want to delete"),
        Line::from(vec![
            Span::styled(
                format!("{} ", action.lead_id),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(display_text),
            Span::raw("?"),
        ]),
        Line::from(""),
    ];

    // Cancel, Delete
    let options = [(false, "Cancel", Color::White), (true, "Delete", Color::Red)];
    for (is_delete, label, color) in options {
        let is_selected = action.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(hint_line(&[
        ("↑↓", "select"),
        ("Enter", "confirm"),
        ("y/n", "yes/no"),
        ("Esc", "cancel"),
    ]));

    render_dialog_frame(frame, dialog_area, content, Color::Red);
}
