//! Lead service client: single-shot wrappers over the store operations

use crate::error::LeadError;
use crate::state::{Draft, Lead, LeadId, LeadStatus};
use crate::store::{LeadFeed, LeadStore};
use std::sync::Arc;

/// Thin request/response wrapper around a [`LeadStore`].
///
/// Performs presence and shape checks before calling the store; the store's
/// own validation stays authoritative. Calls are never retried.
#[derive(Clone)]
pub struct LeadService {
    store: Arc<dyn LeadStore>,
}

impl LeadService {
    pub fn new(store: Arc<dyn LeadStore>) -> Self {
        Self { store }
    }

    /// List every lead
    pub async fn list_leads(&self) -> Result<Vec<Lead>, LeadError> {
        tracing::debug!("Listing leads");
        logged("list leads", self.store.list_leads().await)
    }

    /// Create a lead from a draft, returning the new id
    pub async fn create_lead(&self, draft: Draft) -> Result<LeadId, LeadError> {
        draft.validate()?;
        let draft = draft.normalized();
        tracing::debug!("Creating lead for {}", draft.company);

        let id = logged("create lead", self.store.create_lead(draft).await)?;
        tracing::info!("Created lead {id}");
        Ok(id)
    }

    /// Set a lead's status. Values outside the pipeline never reach the store.
    pub async fn update_status(&self, id: LeadId, new_status: &str) -> Result<(), LeadError> {
        let status: LeadStatus = new_status.parse()?;
        tracing::debug!("Updating lead {id} to {status}");

        logged("update status", self.store.update_status(id, status).await)?;
        tracing::info!("Lead {id} is now {status}");
        Ok(())
    }

    /// Delete a lead
    pub async fn delete_lead(&self, id: LeadId) -> Result<(), LeadError> {
        tracing::debug!("Deleting lead {id}");

        logged("delete lead", self.store.delete_lead(id).await)?;
        tracing::info!("Deleted lead {id}");
        Ok(())
    }

    /// Open the live subscription
    pub async fn subscribe(&self) -> Result<LeadFeed, LeadError> {
        logged("subscribe", self.store.subscribe().await)
    }
}

fn logged<T>(operation: &str, result: Result<T, LeadError>) -> Result<T, LeadError> {
    if let Err(err) = &result {
        tracing::warn!("Lead store failed to {operation}: {err:?}");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryLeadStore, MockLeadStore};
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    fn acme() -> Draft {
        Draft {
            company: "Acme".to_string(),
            email: "a@acme.com".to_string(),
            value: 500,
            status: LeadStatus::New,
        }
    }

    fn service(mock: MockLeadStore) -> LeadService {
        LeadService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_create_forwards_normalized_draft() {
        let mut mock = MockLeadStore::new();
        mock.expect_create_lead()
            .withf(|d| d.company == "Acme" && d.email == "a@acme.com")
            .times(1)
            .returning(|_| Ok(LeadId(7)));

        let draft = Draft {
            company: " Acme ".to_string(),
            ..acme()
        };
        assert_eq!(service(mock).create_lead(draft).await, Ok(LeadId(7)));
    }

    #[tokio::test]
    async fn test_empty_company_never_reaches_store() {
        let mut mock = MockLeadStore::new();
        mock.expect_create_lead().never();

        let result = service(mock)
            .create_lead(Draft {
                company: String::new(),
                ..acme()
            })
            .await;
        assert!(matches!(result, Err(LeadError::Validation(_))));
    }

    #[tokio::test]
    async fn test_malformed_email_never_reaches_store() {
        let mut mock = MockLeadStore::new();
        mock.expect_create_lead().never();

        let result = service(mock)
            .create_lead(Draft {
                email: "acme.com".to_string(),
                ..acme()
            })
            .await;
        assert!(matches!(result, Err(LeadError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_validation_error_is_passed_through() {
        let mut mock = MockLeadStore::new();
        mock.expect_create_lead()
            .returning(|_| Err(LeadError::validation("Company already tracked")));

        let result = service(mock).create_lead(acme()).await;
        assert_eq!(result, Err(LeadError::validation("Company already tracked")));
    }

    #[tokio::test]
    async fn test_bogus_status_never_reaches_store() {
        let mut mock = MockLeadStore::new();
        mock.expect_update_status().never();

        let result = service(mock).update_status(LeadId(42), "Bogus").await;
        assert!(matches!(result, Err(LeadError::Validation(_))));
    }

    #[tokio::test]
    async fn test_valid_status_is_forwarded() {
        let mut mock = MockLeadStore::new();
        mock.expect_update_status()
            .with(eq(LeadId(42)), eq(LeadStatus::ClosedWon))
            .times(1)
            .returning(|_, _| Ok(()));

        assert_eq!(
            service(mock).update_status(LeadId(42), "Closed-Won").await,
            Ok(())
        );
    }

    #[tokio::test]
    async fn test_delete_not_found_is_reported() {
        let mut mock = MockLeadStore::new();
        mock.expect_delete_lead()
            .with(eq(LeadId(3)))
            .returning(|id| Err(LeadError::not_found(format!("Lead {id} does not exist"))));

        let result = service(mock).delete_lead(LeadId(3)).await;
        assert_eq!(result, Err(LeadError::not_found("Lead #3 does not exist")));
    }

    #[tokio::test]
    async fn test_list_data_access_error() {
        let mut mock = MockLeadStore::new();
        mock.expect_list_leads()
            .returning(|| Err(LeadError::data_access("connection refused")));

        let result = service(mock).list_leads().await;
        assert!(matches!(result, Err(LeadError::DataAccess(_))));
    }

    #[tokio::test]
    async fn test_bogus_status_leaves_store_untouched() {
        let store = Arc::new(InMemoryLeadStore::new());
        let service = LeadService::new(store.clone());
        let id = service.create_lead(acme()).await.unwrap();

        let result = service.update_status(id, "Bogus").await;

        assert!(matches!(result, Err(LeadError::Validation(_))));
        let leads = service.list_leads().await.unwrap();
        assert_eq!(leads[0].status, LeadStatus::New);
    }
}
