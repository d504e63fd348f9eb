//! Layout components (header, status bar)

use crate::app::App;
use crate::state::{format_value, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title line with pipeline totals
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let table = &app.state.table;
    let leads = table.leads();
    let open = leads.iter().filter(|l| !l.status.is_closed()).count();
    let pipeline: u64 = leads
        .iter()
        .filter(|l| !l.status.is_closed())
        .fold(0u64, |acc, l| acc.saturating_add(l.value));

    let mut spans = vec![Span::styled(
        " Leads ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if table.is_loaded() {
        spans.push(Span::styled(
            format!("  {} total  {} open  ", leads.len(), open),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            format!("pipeline ${}", format_value(pipeline)),
            Style::default().fg(Color::Green),
        ));
    } else {
        spans.push(Span::styled(
            "  loading...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.store_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if app.state.in_flight > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("⟳ {} pending", app.state.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Store address on the right
    let address = format!(" {} ", app.state.store_address);
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let address_width = (address.chars().count() as u16).min(area.width);
    let address_area = Rect {
        x: area.x + area.width.saturating_sub(address_width),
        y: area.y,
        width: address_width,
        height: 1,
    };
    let address_widget =
        Paragraph::new(address).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(address_widget, address_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::Leads => {
            "j/k:nav  n:new  s:status  d:delete  o/O:sort  f:filter  r:refresh  q:quit"
                .to_string()
        }
        View::LeadCreate => format!(
            "Tab:next  ←/→:status  {}:create  Esc:cancel",
            crate::platform::SUBMIT_SHORTCUT
        ),
    }
}
