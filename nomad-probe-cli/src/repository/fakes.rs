//! In-memory repositories for runner and poller tests

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use nomad_probe_core::domain::allocation::{Allocation, ClientStatus};
use nomad_probe_core::domain::job::JobSpec;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AllocationRepository, JobRepository};

/// Builds an allocation stub
pub(crate) fn alloc(job_id: &str, status: &str) -> Allocation {
    Allocation {
        id: format!("{}-{}", job_id, status),
        job_id: job_id.to_string(),
        name: format!("{}.group[0]", job_id),
        task_group: "group".to_string(),
        node_id: "node-1".to_string(),
        client_status: ClientStatus::from(status),
        client_description: String::new(),
    }
}

/// Job repository that records every call
#[derive(Default)]
pub(crate) struct FakeJobs {
    /// Job returned by `parse_hcl`; `None` makes parsing fail
    pub parsed: Option<Value>,
    /// Whether a previous instance exists to purge
    pub existing: bool,
    pub fail_purge: bool,
    pub fail_register: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeJobs {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl JobRepository for FakeJobs {
    async fn parse_hcl(&self, _hcl: &str) -> Result<Value> {
        self.record("parse".to_string());
        self.parsed
            .clone()
            .ok_or_else(|| anyhow!("input.hcl:1,1-2: Invalid block definition"))
    }

    async fn purge(&self, job_id: &str) -> Result<bool> {
        self.record(format!("purge:{}", job_id));
        if self.fail_purge {
            return Err(anyhow!("API error (status 500): rpc error: No cluster leader"));
        }
        Ok(self.existing)
    }

    async fn register(&self, spec: &JobSpec) -> Result<()> {
        self.record(format!("register:{}", spec.id));
        if self.fail_register {
            return Err(anyhow!("API error (status 400): Task group web validation failed"));
        }
        Ok(())
    }
}

/// Allocation repository replaying one scripted response per call
///
/// Once the script is exhausted every call returns an empty list.
#[derive(Default)]
pub(crate) struct ScriptedAllocations {
    script: Mutex<VecDeque<Result<Vec<Allocation>, String>>>,
    calls: AtomicUsize,
}

impl ScriptedAllocations {
    pub fn new(script: Vec<Result<Vec<Allocation>, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Same response on every call
    pub fn always(allocations: Vec<Allocation>) -> Self {
        Self::new(vec![Ok(allocations); 64])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AllocationRepository for ScriptedAllocations {
    async fn list(&self) -> Result<Vec<Allocation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(allocations)) => Ok(allocations),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}
