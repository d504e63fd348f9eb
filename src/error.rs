//! Error taxonomy for lead operations

use thiserror::Error;

/// Message used when the store fails without saying why
const GENERIC_FAILURE: &str = "The lead store could not complete the request";

/// Errors returned by the lead service and stores.
///
/// All variants are recoverable: the UI reports them and stays interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    /// Bad input, detected locally or by the store
    #[error("{0}")]
    Validation(String),
    /// The target lead no longer exists
    #[error("{0}")]
    NotFound(String),
    /// Transport or backend failure
    #[error("{0}")]
    DataAccess(String),
}

impl LeadError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Build a data access error, falling back to a generic message when empty
    pub fn data_access(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::DataAccess(GENERIC_FAILURE.to_string())
        } else {
            Self::DataAccess(message)
        }
    }

    /// Notification title for this kind of failure
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Invalid Lead",
            Self::NotFound(_) => "Lead Not Found",
            Self::DataAccess(_) => "Store Error",
        }
    }
}

impl From<tonic::Status> for LeadError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().trim();
        match status.code() {
            tonic::Code::InvalidArgument | tonic::Code::FailedPrecondition => {
                if message.is_empty() {
                    Self::validation("The store rejected the lead")
                } else {
                    Self::validation(message)
                }
            }
            tonic::Code::NotFound => {
                if message.is_empty() {
                    Self::not_found("The lead no longer exists")
                } else {
                    Self::not_found(message)
                }
            }
            code => {
                if message.is_empty() {
                    Self::data_access(format!("{GENERIC_FAILURE} ({code:?})"))
                } else {
                    Self::data_access(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_validation() {
        let err = LeadError::from(tonic::Status::invalid_argument("email is malformed"));
        assert_eq!(err, LeadError::validation("email is malformed"));
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err = LeadError::from(tonic::Status::not_found("lead 42 does not exist"));
        assert!(matches!(err, LeadError::NotFound(_)));
        assert_eq!(err.to_string(), "lead 42 does not exist");
    }

    #[test]
    fn test_unavailable_maps_to_data_access() {
        let err = LeadError::from(tonic::Status::unavailable("connection refused"));
        assert!(matches!(err, LeadError::DataAccess(_)));
    }

    #[test]
    fn test_empty_message_falls_back_to_generic() {
        let err = LeadError::from(tonic::Status::internal(""));
        assert!(err.to_string().starts_with(GENERIC_FAILURE));

        let err = LeadError::from(tonic::Status::not_found(""));
        assert_eq!(err.to_string(), "The lead no longer exists");
    }

    #[test]
    fn test_data_access_blank_message() {
        assert_eq!(
            LeadError::data_access("   ").to_string(),
            GENERIC_FAILURE.to_string()
        );
    }

    #[test]
    fn test_titles_are_distinct() {
        assert_ne!(
            LeadError::validation("x").title(),
            LeadError::not_found("x").title()
        );
        assert_ne!(
            LeadError::not_found("x").title(),
            LeadError::data_access("x").title()
        );
    }
}
