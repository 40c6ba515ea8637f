//! Allocation domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Allocation stub as returned by `GET /v1/allocations`
///
/// Only the fields the probe looks at are modelled; everything else in the
/// response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Allocation {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "JobID")]
    pub job_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task_group: String,
    #[serde(rename = "NodeID", default)]
    pub node_id: String,
    pub client_status: ClientStatus,
    #[serde(default)]
    pub client_description: String,
}

impl Allocation {
    /// Whether this allocation belongs to the given job
    pub fn belongs_to(&self, job_id: &str) -> bool {
        self.job_id == job_id
    }
}

/// Returns the first allocation of `job_id` in list order
///
/// Later allocations of the same job are not considered, even when their
/// status differs.
pub fn first_for_job<'a>(allocations: &'a [Allocation], job_id: &str) -> Option<&'a Allocation> {
    allocations.iter().find(|alloc| alloc.belongs_to(job_id))
}

/// Client-side status of an allocation
///
/// Nomad reports this as a free-form string. Values the probe does not know
/// are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientStatus {
    Pending,
    Running,
    Complete,
    Failed,
    Lost,
    Unknown,
    Other(String),
}

impl ClientStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClientStatus::Pending => "pending",
            ClientStatus::Running => "running",
            ClientStatus::Complete => "complete",
            ClientStatus::Failed => "failed",
            ClientStatus::Lost => "lost",
            ClientStatus::Unknown => "unknown",
            ClientStatus::Other(s) => s,
        }
    }
}

impl From<String> for ClientStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ClientStatus::Pending,
            "running" => ClientStatus::Running,
            "complete" => ClientStatus::Complete,
            "failed" => ClientStatus::Failed,
            "lost" => ClientStatus::Lost,
            "unknown" => ClientStatus::Unknown,
            _ => ClientStatus::Other(s),
        }
    }
}

impl From<&str> for ClientStatus {
    fn from(s: &str) -> Self {
        ClientStatus::from(s.to_string())
    }
}

impl From<ClientStatus> for String {
    fn from(status: ClientStatus) -> Self {
        match status {
            ClientStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
