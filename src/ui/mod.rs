//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod leads;

use crate::app::App;
use crate::state::{PendingRowAction, View};
use components::{render_confirm_dialog, render_status_dialog, render_toast};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Leads => leads::draw_list(frame, main_area, app),
        View::LeadCreate => forms::draw_lead_create(frame, main_area, app),
    }

    layout::draw_status_bar(frame, status_area, app);

    // Overlays
    match &app.state.pending_action {
        Some(PendingRowAction::Delete(action)) => render_confirm_dialog(frame, action),
        Some(PendingRowAction::UpdateStatus(action)) => render_status_dialog(frame, action),
        None => {}
    }

    if let Some(notice) = app.toasts.current() {
        render_toast(frame, main_area, notice);
    }
}
