//! Jobs repository
//!
//! Handles the job calls of a check run:
//! - Parsing HCL job specifications
//! - Purging the previous instance of a job
//! - Registering the job

use anyhow::{Context, Result};
use async_trait::async_trait;
use nomad_probe_client::NomadClient;
use nomad_probe_core::domain::job::JobSpec;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Repository trait for job-related operations
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Parses an HCL job specification into its API JSON form
    ///
    /// # Arguments
    /// * `hcl` - The job specification text
    async fn parse_hcl(&self, hcl: &str) -> Result<Value>;

    /// Deregisters and purges a job
    ///
    /// Returns `false` when no job with this ID existed.
    ///
    /// # Arguments
    /// * `job_id` - The ID of the job to purge
    async fn purge(&self, job_id: &str) -> Result<bool>;

    /// Registers a job
    ///
    /// # Arguments
    /// * `spec` - The job to register
    async fn register(&self, spec: &JobSpec) -> Result<()>;
}

/// HTTP implementation of JobRepository
pub struct HttpJobRepository {
    client: Arc<NomadClient>,
}

impl HttpJobRepository {
    /// Creates a new HTTP job repository
    pub fn new(client: Arc<NomadClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for HttpJobRepository {
    async fn parse_hcl(&self, hcl: &str) -> Result<Value> {
        let job = self
            .client
            .parse_job(hcl)
            .await
            .context("Nomad rejected the job specification")?;

        Ok(job)
    }

    async fn purge(&self, job_id: &str) -> Result<bool> {
        match self.client.deregister_job(job_id, true).await {
            Ok(resp) => {
                debug!("Purged job {} (evaluation {})", job_id, resp.eval_id);
                Ok(true)
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn register(&self, spec: &JobSpec) -> Result<()> {
        let resp = self.client.register_job(&spec.job).await?;

        if !resp.warnings.is_empty() {
            debug!("Nomad warnings for job {}: {}", spec.id, resp.warnings);
        }

        Ok(())
    }
}
