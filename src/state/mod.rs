//! Application state module

mod app_state;
mod forms;
mod lead;
mod leads;
mod notification;

pub use app_state::*;
pub use forms::*;
pub use lead::*;
pub use leads::*;
pub use notification::*;
