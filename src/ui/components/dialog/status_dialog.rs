//! Status picker dialog - pipeline stages with type-to-filter

use super::base::{centered_area, hint_line, render_dialog_frame, truncate_string};
use crate::state::PendingStatusAction;
use crate::ui::leads::status_style;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render the status picker for a lead
pub fn render_status_dialog(frame: &mut Frame, action: &PendingStatusAction) {
    let dialog_width = 46u16;
    let dialog_area = centered_area(frame.area(), dialog_width, 16);

    let mut content = vec![
        Line::from(Span::styled(
            "Update Status",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Lead: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", action.lead_id),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(truncate_string(&action.company, (dialog_width - 16) as usize)),
        ]),
        Line::from(vec![
            Span::styled("Now:  ", Style::default().fg(Color::DarkGray)),
            Span::styled(action.current.label(), status_style(action.current)),
        ]),
        Line::from(""),
        // Search field
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                if action.filter.is_empty() {
                    "type to filter...".to_string()
                } else {
                    action.filter.clone()
                },
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    let options = action.options();
    if options.is_empty() {
        content.push(Line::from(Span::styled(
            "  No matching status",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let selected = action.selected_index.min(options.len() - 1);
        for (idx, status) in options.iter().enumerate() {
            let is_selected = idx == selected;
            let prefix = if is_selected { " ▸ " } else { "   " };
            let style = if is_selected {
                status_style(*status).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if *status == action.current { " (current)" } else { "" };
            content.push(Line::from(vec![
                Span::styled(format!("{prefix}{}", status.label()), style),
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    content.push(Line::from(""));
    content.push(hint_line(&[
        ("↑↓", "select"),
        ("Enter", "apply"),
        ("Esc", "cancel"),
    ]));

    render_dialog_frame(frame, dialog_area, content, Color::Cyan);
}
