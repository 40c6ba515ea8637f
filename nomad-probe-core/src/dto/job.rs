//! Job DTOs for the Nomad HTTP API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /v1/jobs/parse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseJobRequest {
    #[serde(rename = "JobHCL")]
    pub job_hcl: String,
    #[serde(rename = "Canonicalize")]
    pub canonicalize: bool,
}

/// Body of `PUT /v1/jobs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterJobRequest {
    #[serde(rename = "Job")]
    pub job: Value,
}

/// Response of `PUT /v1/jobs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobRegisterResponse {
    #[serde(rename = "EvalID", default)]
    pub eval_id: String,
    #[serde(default)]
    pub job_modify_index: u64,
    #[serde(default)]
    pub warnings: String,
}

/// Response of `DELETE /v1/job/:job_id`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobDeregisterResponse {
    #[serde(rename = "EvalID", default)]
    pub eval_id: String,
    #[serde(default)]
    pub job_modify_index: u64,
}
