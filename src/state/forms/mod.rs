//! Form domain layer
//!
//! Type-safe form handling for the new-lead view.

mod field;
mod lead_form;

pub use field::FormField;
pub use lead_form::{Form, FormButton, LeadForm, SubmitPhase, SubmitRequest};
