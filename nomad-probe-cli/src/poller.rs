//! Allocation status poller
//!
//! Lists allocations once per interval until the tracked job shows a
//! decisive client status or the timeout passes.

use nomad_probe_core::domain::allocation::{Allocation, ClientStatus, first_for_job};
use nomad_probe_core::domain::verdict::Verdict;
use std::sync::Arc;
use tokio::time::{self, Duration, Instant};
use tracing::debug;

use crate::error::CheckError;
use crate::repository::AllocationRepository;

/// Pause between two allocation queries
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where the poller stands after a cycle
#[derive(Debug)]
pub enum PollState {
    /// No decisive status seen yet
    Polling,
    TimedOut,
    ObservedComplete(String),
    ObservedRunning(String),
    ObservedFailed(String),
    QueryError(anyhow::Error),
}

impl PollState {
    /// State implied by the first allocation of the tracked job
    pub fn observe(allocation: Option<&Allocation>) -> Self {
        let Some(alloc) = allocation else {
            return PollState::Polling;
        };

        match alloc.client_status {
            ClientStatus::Complete => PollState::ObservedComplete(alloc.job_id.clone()),
            ClientStatus::Running => PollState::ObservedRunning(alloc.job_id.clone()),
            ClientStatus::Failed => PollState::ObservedFailed(alloc.job_id.clone()),
            _ => PollState::Polling,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling)
    }

    pub fn into_verdict(self) -> Verdict {
        match self {
            PollState::ObservedComplete(job_id) => {
                Verdict::warning(format!("Job {} is completed", job_id))
            }
            PollState::ObservedRunning(job_id) => {
                Verdict::ok(format!("Job {} running successfully", job_id))
            }
            PollState::ObservedFailed(job_id) => Verdict::critical(format!("{} Job failed", job_id)),
            PollState::TimedOut => Verdict::critical("Job timed out"),
            PollState::QueryError(e) => CheckError::Query(e).into(),
            // The poll loop only exits on a terminal state
            PollState::Polling => Verdict::unknown("Unsupported status message"),
        }
    }
}

/// Polls the allocation list for one job
pub struct StatusPoller {
    allocations: Arc<dyn AllocationRepository>,
    job_id: String,
    /// `None` when the deadline has already passed before the first poll
    timeout: Option<Duration>,
    interval: Duration,
}

impl StatusPoller {
    /// Creates a poller for `job_id` with the default interval
    pub fn new(
        allocations: Arc<dyn AllocationRepository>,
        job_id: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            allocations,
            job_id: job_id.into(),
            timeout,
            interval: POLL_INTERVAL,
        }
    }

    /// Overrides the pause between queries
    #[cfg(test)]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Polls until a terminal state and returns its verdict
    pub async fn run(&self) -> Verdict {
        let started = Instant::now();

        let state = loop {
            let state = self.poll_once(started).await;
            if state.is_terminal() {
                break state;
            }
            time::sleep(self.interval).await;
        };

        debug!("Polling for job {} ended in {:?}", self.job_id, state);
        state.into_verdict()
    }

    /// Performs a single poll cycle
    async fn poll_once(&self, started: Instant) -> PollState {
        match self.timeout {
            Some(timeout) if started.elapsed() <= timeout => {}
            _ => return PollState::TimedOut,
        }

        let allocations = match self.allocations.list().await {
            Ok(allocations) => allocations,
            Err(e) => return PollState::QueryError(e),
        };

        let first = first_for_job(&allocations, &self.job_id);
        match first {
            Some(alloc) => debug!(
                "Allocation {} of job {} is {}",
                alloc.id, self.job_id, alloc.client_status
            ),
            None => debug!(
                "No allocation for job {} among {}",
                self.job_id,
                allocations.len()
            ),
        }

        PollState::observe(first)
    }
}
