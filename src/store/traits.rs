//! Trait abstraction for the lead store to enable mocking in tests

use crate::error::LeadError;
use crate::state::{Draft, Lead, LeadId, LeadStatus};
use async_trait::async_trait;
use tokio::sync::watch;

/// Live view of the store: always holds the latest full lead list
pub type LeadFeed = watch::Receiver<Vec<Lead>>;

/// Remote operations offered by a lead store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// List every lead
    async fn list_leads(&self) -> Result<Vec<Lead>, LeadError>;

    /// Persist a new lead and return its store-assigned id
    async fn create_lead(&self, draft: Draft) -> Result<LeadId, LeadError>;

    /// Change the status of one lead
    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<(), LeadError>;

    /// Remove a lead
    async fn delete_lead(&self, id: LeadId) -> Result<(), LeadError>;

    /// Open a live subscription that re-delivers the full list on every change
    async fn subscribe(&self) -> Result<LeadFeed, LeadError>;
}
