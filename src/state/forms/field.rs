//! Form field value objects

use crate::state::LeadStatus;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Raw digits as typed; parsed on submit so bad input can be reported
    Number(String),
    Status(LeadStatus),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    /// Create a new numeric field (empty means zero)
    pub fn number(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Number(String::new()),
        }
    }

    /// Create a new status picklist field
    pub fn status(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Status(LeadStatus::default()),
        }
    }

    /// Get the raw text (empty for status fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s,
            FieldValue::Status(_) => "",
        }
    }

    /// Get the status value (default status for non-status fields)
    pub fn as_status(&self) -> LeadStatus {
        match &self.value {
            FieldValue::Status(s) => *s,
            _ => LeadStatus::default(),
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self.value, FieldValue::Status(_))
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.push(c),
            FieldValue::Status(_) => {
                // Picklist only changes via cycling
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => {
                s.pop();
            }
            FieldValue::Status(_) => {}
        }
    }

    /// Step a status field forward or back through the pipeline
    pub fn cycle_status(&mut self, forward: bool) {
        if let FieldValue::Status(s) = &mut self.value {
            *s = if forward { s.next() } else { s.prev() };
        }
    }

    /// Reset the field to its default value
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) | FieldValue::Number(s) => s.clear(),
            FieldValue::Status(s) => *s = LeadStatus::default(),
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(s) if s.is_empty() => "0".to_string(),
            FieldValue::Number(s) => s.clone(),
            FieldValue::Status(s) => format!("◂ {} ▸", s.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_field_editing() {
        let mut field = FormField::text("Company");
        field.push_char('A');
        field.push_char('c');
        assert_eq!(field.as_text(), "Ac");
        field.pop_char();
        assert_eq!(field.as_text(), "A");
        field.clear();
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_number_field_displays_zero_when_empty() {
        let mut field = FormField::number("Annual Value");
        assert_eq!(field.display_value(), "0");
        field.push_char('5');
        assert_eq!(field.display_value(), "5");
    }

    #[test]
    fn test_status_field_ignores_typing() {
        let mut field = FormField::status("Status");
        field.push_char('x');
        field.pop_char();
        assert_eq!(field.as_status(), LeadStatus::New);
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_status_field_cycles() {
        let mut field = FormField::status("Status");
        field.cycle_status(true);
        assert_eq!(field.as_status(), LeadStatus::Contacted);
        field.cycle_status(false);
        field.cycle_status(false);
        assert_eq!(field.as_status(), LeadStatus::ClosedLost);
        field.clear();
        assert_eq!(field.as_status(), LeadStatus::New);
    }

    #[test]
    fn test_cycle_on_text_field_is_noop() {
        let mut field = FormField::text("Email");
        field.cycle_status(true);
        assert_eq!(field.value, FieldValue::Text(String::new()));
    }
}
