//! Error types for a check run
//!
//! Every error ends the run. Each one maps to a CRITICAL verdict carrying
//! the error text.

use nomad_probe_client::ClientError;
use nomad_probe_core::domain::verdict::Verdict;
use thiserror::Error;

/// Errors that abort a check run
#[derive(Debug, Error)]
pub enum CheckError {
    /// The Nomad client could not be built
    #[error("Error creating Nomad client: {0}")]
    ClientConstruction(#[from] ClientError),

    /// The job file could not be read or parsed
    #[error("Error parsing job specification: {0:#}")]
    JobParse(anyhow::Error),

    /// Registering the job failed
    #[error("Error registering job: {0:#}")]
    Registration(anyhow::Error),

    /// Listing allocations failed
    #[error("Error getting allocations: {0:#}")]
    Query(anyhow::Error),
}

impl From<CheckError> for Verdict {
    fn from(err: CheckError) -> Self {
        Verdict::critical(err.to_string())
    }
}
