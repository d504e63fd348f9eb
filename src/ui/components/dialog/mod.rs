//! Dialog components for TUI

mod base;
mod confirm_dialog;
mod status_dialog;

pub use base::wrap_text;
pub use confirm_dialog::render_confirm_dialog;
pub use status_dialog::render_status_dialog;
