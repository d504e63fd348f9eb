//! Lead table view

use crate::app::App;
use crate::state::{format_value, LeadStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Draw the lead table with its sort/filter header
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    let table = &app.state.table;
    let rows = table.visible();

    let filter_label = table
        .status_filter
        .map(|s| s.label())
        .unwrap_or("All");

    let block = Block::default()
        .title(format!(" Leads - {filter_label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if rows.is_empty() {
        let message = if !table.is_loaded() {
            "Loading leads..."
        } else if table.status_filter.is_some() {
            "No leads with this status. Press 'f' to change the filter."
        } else {
            "No leads yet.\nPress 'n' to create a new lead."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Split area for header and table
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    // Header with sort info
    let sort_label = format!(
        "Sort: {} {}",
        table.sort_field.label(),
        table.sort_direction.symbol()
    );
    let summary = format!(
        "{} shown  ${}",
        rows.len(),
        format_value(table.visible_total_value())
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(sort_label, Style::default().fg(Color::Cyan)),
        Span::styled(" [o]cycle [O]dir", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(summary, Style::default().fg(Color::White)),
        Span::styled(" [f]ilter", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|lead| {
            Row::new(vec![
                Cell::from(lead.id.to_string()).style(Style::default().fg(Color::Cyan)),
                Cell::from(lead.company.clone()),
                Cell::from(lead.email.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(format!("${:>12}", format_value(lead.value))),
                Cell::from(lead.status.label()).style(status_style(lead.status)),
                Cell::from(lead.created_at.format("%Y-%m-%d").to_string())
                    .style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(28),
        Constraint::Percentage(30),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let header_row = Row::new(vec!["ID", "Company", "Email", "Annual Value", "Status", "Added"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let widget = Table::new(table_rows, widths)
        .header(header_row)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(table.selected_index));
    frame.render_stateful_widget(widget, chunks[1], &mut state);
}

/// Colour-code the pipeline stage
pub fn status_style(status: LeadStatus) -> Style {
    let color = match status {
        LeadStatus::New => Color::Blue,
        LeadStatus::Contacted => Color::Yellow,
        LeadStatus::Qualified => Color::Magenta,
        LeadStatus::ClosedWon => Color::Green,
        LeadStatus::ClosedLost => Color::Red,
    };
    Style::default().fg(color)
}
