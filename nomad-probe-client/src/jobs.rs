//! Job-related API endpoints

use crate::NomadClient;
use crate::error::Result;
use nomad_probe_core::dto::job::{
    JobDeregisterResponse, JobRegisterResponse, ParseJobRequest, RegisterJobRequest,
};
use serde_json::Value;
use tracing::debug;

impl NomadClient {
    // =============================================================================
    // Job Specification
    // =============================================================================

    /// Parse an HCL job specification into its API JSON form
    ///
    /// The agent does the parsing (`POST /v1/jobs/parse`), so the accepted
    /// grammar is whatever the cluster's Nomad version understands.
    ///
    /// # Arguments
    /// * `hcl` - The job specification text
    ///
    /// # Returns
    /// The canonicalized job object
    pub async fn parse_job(&self, hcl: &str) -> Result<Value> {
        let url = self.endpoint(&["v1", "jobs", "parse"]);
        let response = self
            .scoped(self.client.post(url))
            .json(&ParseJobRequest {
                job_hcl: hcl.to_string(),
                canonicalize: true,
            })
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Register (create or update) a job
    ///
    /// # Arguments
    /// * `job` - The job in API JSON form
    ///
    /// # Returns
    /// The evaluation created for the registration
    pub async fn register_job(&self, job: &Value) -> Result<JobRegisterResponse> {
        let url = self.endpoint(&["v1", "jobs"]);
        let response = self
            .scoped(self.client.put(url))
            .json(&RegisterJobRequest { job: job.clone() })
            .send()
            .await?;

        let registered: JobRegisterResponse = self.handle_response(response).await?;
        debug!("Job registered, evaluation {}", registered.eval_id);

        Ok(registered)
    }

    /// Deregister a job
    ///
    /// # Arguments
    /// * `job_id` - The job ID
    /// * `purge` - Remove the job from the state store instead of only stopping it
    pub async fn deregister_job(&self, job_id: &str, purge: bool) -> Result<JobDeregisterResponse> {
        let url = self.endpoint(&["v1", "job", job_id]);
        let response = self
            .scoped(self.client.delete(url))
            .query(&[("purge", purge)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
