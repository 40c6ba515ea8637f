//! Allocations repository

use anyhow::Result;
use async_trait::async_trait;
use nomad_probe_client::NomadClient;
use nomad_probe_core::domain::allocation::Allocation;
use std::sync::Arc;

/// Repository trait for allocation queries
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    /// Lists all allocations with resource details, in agent order
    async fn list(&self) -> Result<Vec<Allocation>>;
}

/// HTTP implementation of AllocationRepository
pub struct HttpAllocationRepository {
    client: Arc<NomadClient>,
}

impl HttpAllocationRepository {
    /// Creates a new HTTP allocation repository
    pub fn new(client: Arc<NomadClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AllocationRepository for HttpAllocationRepository {
    async fn list(&self) -> Result<Vec<Allocation>> {
        Ok(self.client.list_allocations(true).await?)
    }
}
