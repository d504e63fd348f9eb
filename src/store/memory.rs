//! In-process lead store
//!
//! Holds leads in memory and publishes every change through a watch channel.
//! Selected with the `memory://` address; nothing is persisted.

use super::traits::{LeadFeed, LeadStore};
use crate::error::LeadError;
use crate::state::{Draft, Lead, LeadId, LeadStatus};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

pub struct InMemoryLeadStore {
    /// The channel's current value is the store's contents
    leads: watch::Sender<Vec<Lead>>,
    next_id: AtomicU64,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        let (leads, _) = watch::channel(Vec::new());
        Self {
            leads,
            next_id: AtomicU64::new(1),
        }
    }

    /// A store pre-filled with a few leads, for demos
    pub fn with_sample_leads() -> Self {
        let store = Self::new();
        let samples = [
            ("Acme Corp", "buyer@acme.com", 12_500, LeadStatus::New),
            ("Globex", "ops@globex.io", 48_000, LeadStatus::Contacted),
            ("Initech", "procurement@initech.com", 7_200, LeadStatus::Qualified),
            ("Umbrella", "contracts@umbrella.co", 95_000, LeadStatus::ClosedWon),
        ];
        for (company, email, value, status) in samples {
            store.insert(Draft {
                company: company.to_string(),
                email: email.to_string(),
                value,
                status,
            });
        }
        store
    }

    fn insert(&self, draft: Draft) -> LeadId {
        let id = LeadId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let lead = Lead {
            id,
            company: draft.company,
            email: draft.email,
            value: draft.value,
            status: draft.status,
            created_at: Utc::now(),
        };
        self.leads.send_modify(|leads| leads.push(lead));
        id
    }
}

impl Default for InMemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn list_leads(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.leads.borrow().clone())
    }

    async fn create_lead(&self, draft: Draft) -> Result<LeadId, LeadError> {
        // The store validates on its own; callers may skip their checks
        draft.validate()?;
        Ok(self.insert(draft.normalized()))
    }

    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<(), LeadError> {
        let updated = self.leads.send_if_modified(|leads| {
            match leads.iter_mut().find(|l| l.id == id) {
                Some(lead) => {
                    lead.status = status;
                    true
                }
                None => false,
            }
        });

        if updated {
            Ok(())
        } else {
            Err(LeadError::not_found(format!("Lead {id} does not exist")))
        }
    }

    async fn delete_lead(&self, id: LeadId) -> Result<(), LeadError> {
        let removed = self.leads.send_if_modified(|leads| {
            let before = leads.len();
            leads.retain(|l| l.id != id);
            leads.len() != before
        });

        if removed {
            Ok(())
        } else {
            Err(LeadError::not_found(format!("Lead {id} does not exist")))
        }
    }

    async fn subscribe(&self) -> Result<LeadFeed, LeadError> {
        Ok(self.leads.subscribe())
    }
}
