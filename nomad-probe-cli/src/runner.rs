//! Check runner
//!
//! Runs the steps of a check in order: build the client, submit the job
//! (unless only checking), then poll its allocations. Every step returns
//! its failure instead of exiting, so the whole run yields one [`Verdict`].

use nomad_probe_client::NomadClient;
use nomad_probe_core::domain::verdict::Verdict;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::CheckError;
use crate::job::load_job;
use crate::poller::StatusPoller;
use crate::repository::{
    AllocationRepository, HttpAllocationRepository, HttpJobRepository, JobRepository,
};

/// Run a check against the Nomad agent named in `config`
pub async fn run(config: &Config) -> Verdict {
    let client = match NomadClient::new(&config.client_config()) {
        Ok(client) => Arc::new(client),
        Err(e) => return CheckError::ClientConstruction(e).into(),
    };
    debug!("Nomad client ready for {}", client.base_url());

    let jobs = HttpJobRepository::new(Arc::clone(&client));
    let allocations = Arc::new(HttpAllocationRepository::new(client));

    run_with(config, &jobs, allocations).await
}

/// Run a check against the given repositories
pub async fn run_with(
    config: &Config,
    jobs: &dyn JobRepository,
    allocations: Arc<dyn AllocationRepository>,
) -> Verdict {
    let job_id = match config.check_only() {
        Some(job_id) => {
            info!("Check-only mode, watching existing job {}", job_id);
            job_id.to_string()
        }
        None => match submit(config, jobs).await {
            Ok(job_id) => job_id,
            Err(e) => return e.into(),
        },
    };

    StatusPoller::new(allocations, job_id, config.timeout)
        .run()
        .await
}

/// Load the job file, purge any previous instance and register it
///
/// The purge is best-effort; registration runs whatever its outcome.
async fn submit(config: &Config, jobs: &dyn JobRepository) -> Result<String, CheckError> {
    let spec = load_job(jobs, &config.file)
        .await
        .map_err(CheckError::JobParse)?;

    match jobs.purge(&spec.id).await {
        Ok(true) => {}
        Ok(false) => debug!("Job {} was not registered before", spec.id),
        Err(e) => warn!("Failed to purge job {}: {:#}", spec.id, e),
    }

    jobs.register(&spec)
        .await
        .map_err(CheckError::Registration)?;
    info!("Registered job {}", spec.id);

    Ok(spec.id)
}
