//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `lead_form`: New-lead form

mod field_renderer;
mod lead_form;

pub use lead_form::draw_lead_create;
