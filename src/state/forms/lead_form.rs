//! New-lead form and its submit state machine

use super::field::FormField;
use crate::error::LeadError;
use crate::state::{Draft, LeadStatus};

/// Index of the buttons row in the field cycle
const BUTTONS_ROW: usize = 4;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Submit lifecycle of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Editing,
    Submitting,
}

/// Buttons on the form's action row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Create,
    Cancel,
}

impl FormButton {
    pub const ALL: [FormButton; 2] = [FormButton::Create, FormButton::Cancel];
}

/// Outcome of asking the form to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// Local checks passed; the form is now submitting this draft
    Ready(Draft),
    /// Local checks failed; nothing should be sent
    Rejected(LeadError),
    /// A submission is already in flight
    Busy,
}

/// Form for creating a lead
#[derive(Debug, Clone)]
pub struct LeadForm {
    pub company: FormField,
    pub email: FormField,
    pub value: FormField,
    pub status: FormField,
    pub active_field_index: usize,
    /// Selected button when the buttons row is active
    pub selected_button: usize,
    phase: SubmitPhase,
    /// Bumped every time the draft is replaced
    generation: u64,
    /// Generation of the draft currently being saved
    submitted_generation: Option<u64>,
}

impl LeadForm {
    pub fn new() -> Self {
        Self {
            company: FormField::text("Company"),
            email: FormField::text("Email"),
            value: FormField::number("Annual Value"),
            status: FormField::status("Status"),
            active_field_index: 0,
            selected_button: 0,
            phase: SubmitPhase::Editing,
            generation: 0,
            submitted_generation: None,
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index == BUTTONS_ROW
    }

    pub fn is_status_field_active(&self) -> bool {
        self.active_field_index == 3
    }

    pub fn selected_button(&self) -> FormButton {
        FormButton::ALL[self.selected_button.min(FormButton::ALL.len() - 1)]
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % FormButton::ALL.len();
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = FormButton::ALL.len() - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    /// Label for the submit button, relabelled while a save is in flight
    pub fn submit_label(&self) -> &'static str {
        match self.phase {
            SubmitPhase::Editing => "Create Lead",
            SubmitPhase::Submitting => "Saving...",
        }
    }

    /// Build a draft from the current field values, checking presence and shape
    pub fn to_draft(&self) -> Result<Draft, LeadError> {
        let draft = Draft {
            company: self.company.as_text().to_string(),
            email: self.email.as_text().to_string(),
            value: parse_value(self.value.as_text())?,
            status: self.status.as_status(),
        }
        .normalized();
        draft.validate()?;
        Ok(draft)
    }

    /// Editing -> Submitting, guarded by local validation
    pub fn begin_submit(&mut self) -> SubmitRequest {
        if self.is_submitting() {
            return SubmitRequest::Busy;
        }
        match self.to_draft() {
            Ok(draft) => {
                self.phase = SubmitPhase::Submitting;
                self.submitted_generation = Some(self.generation);
                SubmitRequest::Ready(draft)
            }
            Err(err) => SubmitRequest::Rejected(err),
        }
    }

    /// Submitting -> Editing.
    ///
    /// Returns whether the submitted draft is still the one open. Only that
    /// draft resets on success; a draft started after it is left alone.
    pub fn finish_submit(&mut self, succeeded: bool) -> bool {
        self.phase = SubmitPhase::Editing;
        let still_open = self.submitted_generation.take() == Some(self.generation);
        if succeeded && still_open {
            self.reset();
        }
        still_open
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        self.company.clear();
        self.email.clear();
        self.value.clear();
        self.status.clear();
        self.active_field_index = 0;
        self.selected_button = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for LeadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LeadForm {
    fn field_count(&self) -> usize {
        5 // company, email, value, status, buttons
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(BUTTONS_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.company),
            1 => Some(&mut self.email),
            2 => Some(&mut self.value),
            3 => Some(&mut self.status),
            _ => None,
        }
    }
}

/// Parse the annual value field; blank means zero
fn parse_value(raw: &str) -> Result<u64, LeadError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    let digits = raw.replace(',', "");
    if let Some(rest) = digits.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(LeadError::validation("Annual value cannot be negative"));
        }
    }
    digits
        .parse::<u64>()
        .map_err(|_| LeadError::validation(format!("Annual value '{raw}' must be a whole number")))
}
