//! New-lead form rendering

use super::field_renderer::{draw_field, draw_help_text};
use crate::app::App;
use crate::state::{FormButton, SubmitPhase};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the new-lead form with its action panel
pub fn draw_lead_create(frame: &mut Frame, area: Rect, app: &App) {
    // Split into form (left) and action panel (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(20), // Action panel
        ])
        .split(area);

    draw_create_form(frame, main_chunks[0], app);
    draw_create_action_panel(frame, main_chunks[1], app);
}

/// Draw the form fields
fn draw_create_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Company
            Constraint::Length(3), // Email
            Constraint::Length(3), // Annual value
            Constraint::Length(3), // Status
            Constraint::Min(0),
            Constraint::Length(1), // Help text
        ])
        .margin(1)
        .split(area);

    let border_color = if form.is_buttons_row_active() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let title = match form.phase() {
        SubmitPhase::Editing => " New Lead ",
        SubmitPhase::Submitting => " New Lead (saving) ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    let fields = [&form.company, &form.email, &form.value, &form.status];
    for (idx, field) in fields.into_iter().enumerate() {
        draw_field(frame, chunks[idx], field, form.active_field_index == idx);
    }

    draw_help_text(
        frame,
        chunks[5],
        &[
            ("Tab", "next field"),
            ("←/→", "status"),
            (crate::platform::SUBMIT_SHORTCUT, "create"),
            ("Esc", "cancel"),
        ],
    );
}

/// Draw the action panel sidebar
fn draw_create_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let is_focused = form.is_buttons_row_active();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Create (primary)
            Constraint::Length(BUTTON_HEIGHT), // Cancel
            Constraint::Min(0),
        ])
        .split(inner_area);

    let selected = form.selected_button();

    // Create is disabled while a save is in flight
    render_action_button(
        frame,
        button_chunks[0],
        form.submit_label(),
        is_focused && selected == FormButton::Create,
        !form.is_submitting(),
        Some(Color::Green),
    );

    render_action_button(
        frame,
        button_chunks[1],
        "Cancel",
        is_focused && selected == FormButton::Cancel,
        true,
        Some(Color::Gray),
    );
}
