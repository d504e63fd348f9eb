//! Application state definitions

use super::{LeadForm, LeadTable, PendingRowAction};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Leads,
    LeadCreate,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub table: LeadTable,

    // Form state
    pub form: LeadForm,

    // Confirmation / picker step for a row action
    pub pending_action: Option<PendingRowAction>,

    // Store connection
    pub store_address: String,
    pub store_connected: bool,

    // Remote calls dispatched but not yet completed
    pub in_flight: usize,

    pub confirm_deletes: bool,
}

impl AppState {
    pub fn new(store_address: impl Into<String>, confirm_deletes: bool) -> Self {
        Self {
            store_address: store_address.into(),
            confirm_deletes,
            ..Default::default()
        }
    }

    /// Open the new-lead form with a fresh draft
    pub fn open_form(&mut self) {
        self.form.reset();
        self.current_view = View::LeadCreate;
    }

    /// Leave the form, discarding the draft.
    ///
    /// The submit phase is left alone so an in-flight save still blocks a
    /// second one until it completes.
    pub fn close_form(&mut self) {
        self.form.reset();
        self.current_view = View::Leads;
    }

    pub fn has_modal(&self) -> bool {
        self.pending_action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SubmitRequest, FormField};

    fn type_into(field: &mut FormField, text: &str) {
        for c in text.chars() {
            field.push_char(c);
        }
    }

    #[test]
    fn test_default_view_is_leads() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Leads);
        assert!(!state.has_modal());
    }

    #[test]
    fn test_open_form_starts_with_blank_draft() {
        let mut state = AppState::new("memory://", true);
        type_into(&mut state.form.company, "Leftover");
        state.open_form();
        assert_eq!(state.current_view, View::LeadCreate);
        assert_eq!(state.form.company.as_text(), "");
    }

    #[test]
    fn test_close_form_discards_draft() {
        let mut state = AppState::new("memory://", true);
        state.open_form();
        type_into(&mut state.form.company, "Acme");
        state.close_form();
        assert_eq!(state.current_view, View::Leads);
        assert_eq!(state.form.company.as_text(), "");
    }

    #[test]
    fn test_close_form_keeps_submit_lock() {
        let mut state = AppState::new("memory://", true);
        state.open_form();
        type_into(&mut state.form.company, "Acme");
        type_into(&mut state.form.email, "a@acme.com");
        assert!(matches!(state.form.begin_submit(), SubmitRequest::Ready(_)));

        state.close_form();
        assert!(state.form.is_submitting());
    }
}
