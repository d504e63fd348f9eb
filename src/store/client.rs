//! gRPC client for communicating with a remote lead store

use super::traits::{LeadFeed, LeadStore};
use crate::error::LeadError;
use crate::state::{Draft, Lead, LeadId, LeadStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tonic::transport::{Channel, Endpoint};

// Include the generated proto types
pub mod proto {
    tonic::include_proto!("leads");
}

use proto::lead_store_client::LeadStoreClient;

/// Default lead store address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50061";

/// How long to wait for the TCP/HTTP2 handshake
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Lead store reached over gRPC
pub struct GrpcLeadStore {
    client: LeadStoreClient<Channel>,
    address: String,
}

impl GrpcLeadStore {
    /// Build a client; the connection is made on first use
    pub fn connect_lazy(address: &str) -> Result<Self, LeadError> {
        let endpoint = Endpoint::from_shared(address.to_string())
            .map_err(|e| LeadError::data_access(format!("Invalid store address '{address}': {e}")))?
            .connect_timeout(CONNECT_TIMEOUT);

        Ok(Self {
            client: LeadStoreClient::new(endpoint.connect_lazy()),
            address: address.to_string(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// tonic clients are cheap to clone and need `&mut` per call
    fn client(&self) -> LeadStoreClient<Channel> {
        self.client.clone()
    }
}

#[async_trait]
impl LeadStore for GrpcLeadStore {
    async fn list_leads(&self) -> Result<Vec<Lead>, LeadError> {
        let response = self
            .client()
            .list_leads(proto::ListLeadsRequest {})
            .await?;

        Ok(leads_from_proto(response.into_inner().leads))
    }

    async fn create_lead(&self, draft: Draft) -> Result<LeadId, LeadError> {
        let request = proto::CreateLeadRequest {
            company: draft.company,
            email: draft.email,
            value: draft.value,
            status: draft.status.label().to_string(),
        };

        let response = self.client().create_lead(request).await?;
        Ok(LeadId(response.into_inner().id))
    }

    async fn update_status(&self, id: LeadId, status: LeadStatus) -> Result<(), LeadError> {
        let request = proto::UpdateStatusRequest {
            id: id.0,
            status: status.label().to_string(),
        };

        self.client().update_status(request).await?;
        Ok(())
    }

    async fn delete_lead(&self, id: LeadId) -> Result<(), LeadError> {
        self.client()
            .delete_lead(proto::DeleteLeadRequest { id: id.0 })
            .await?;
        Ok(())
    }

    async fn subscribe(&self) -> Result<LeadFeed, LeadError> {
        let mut stream = self
            .client()
            .watch_leads(proto::WatchLeadsRequest {})
            .await?
            .into_inner();

        // The store sends the current list first; wait for it so the feed starts populated
        let first = stream
            .message()
            .await?
            .map(|snapshot| leads_from_proto(snapshot.leads))
            .unwrap_or_default();

        let (tx, rx) = watch::channel(first);
        let address = self.address.clone();

        tokio::spawn(async move {
            loop {
                match stream.message().await {
                    Ok(Some(snapshot)) => {
                        if tx.send(leads_from_proto(snapshot.leads)).is_err() {
                            tracing::debug!("Lead feed dropped by UI, closing stream");
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::info!("Lead store at {address} closed the live stream");
                        break;
                    }
                    Err(status) => {
                        tracing::warn!("Live lead stream from {address} failed: {status}");
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }
}

fn leads_from_proto(leads: Vec<proto::Lead>) -> Vec<Lead> {
    leads.into_iter().map(lead_from_proto).collect()
}

/// Convert a wire lead, normalizing statuses outside the pipeline to `New`
fn lead_from_proto(lead: proto::Lead) -> Lead {
    let status = lead.status.parse::<LeadStatus>().unwrap_or_else(|_| {
        tracing::warn!(
            "Lead #{} has unknown status '{}', showing it as {}",
            lead.id,
            lead.status,
            LeadStatus::default()
        );
        LeadStatus::default()
    });

    Lead {
        id: LeadId(lead.id),
        company: lead.company,
        email: lead.email,
        value: lead.value,
        status,
        created_at: parse_timestamp(&lead.created_at),
    }
}

/// Parse an RFC 3339 timestamp, falling back to the epoch when absent or malformed
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    if s.is_empty() {
        return DateTime::<Utc>::UNIX_EPOCH;
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
