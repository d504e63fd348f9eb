//! Lead store backends: remote gRPC and in-process

mod client;
mod memory;
mod traits;

pub use client::{GrpcLeadStore, DEFAULT_ADDRESS};
pub use memory::InMemoryLeadStore;
pub use traits::{LeadFeed, LeadStore};

#[cfg(test)]
pub use traits::MockLeadStore;

use crate::error::LeadError;
use std::sync::Arc;

/// Address that selects the in-process store
pub const MEMORY_ADDRESS: &str = "memory://";

/// Pick a backend for the configured address
pub fn open(address: &str) -> Result<Arc<dyn LeadStore>, LeadError> {
    if address == MEMORY_ADDRESS {
        tracing::info!("Using in-process lead store");
        Ok(Arc::new(InMemoryLeadStore::with_sample_leads()))
    } else {
        let store = GrpcLeadStore::connect_lazy(address)?;
        tracing::info!("Using lead store at {}", store.address());
        Ok(Arc::new(store))
    }
}
