//! Job specification loading
//!
//! Reads a job file and turns it into a [`JobSpec`]. JSON job files are
//! used as-is; anything else is treated as HCL and parsed by the Nomad agent.

use anyhow::{Context, Result, anyhow};
use nomad_probe_core::domain::job::JobSpec;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::repository::JobRepository;

/// Load the job specification at `path`
///
/// # Errors
/// Returns an error if:
/// - The file cannot be opened or read
/// - A JSON file is malformed
/// - Nomad rejects an HCL file
/// - The job has neither `ID` nor `Name`
pub async fn load_job(jobs: &dyn JobRepository, path: &Path) -> Result<JobSpec> {
    let path = std::path::absolute(path)
        .with_context(|| format!("failed to resolve {}", path.display()))?;

    let source = read_source(&path).await?;

    let spec = if is_json(&source) {
        let document = serde_json::from_str(&source)
            .with_context(|| format!("invalid JSON job in {}", path.display()))?;
        JobSpec::from_document(document)
    } else {
        debug!("Parsing {} as HCL", path.display());
        JobSpec::from_api_job(jobs.parse_hcl(&source).await?)
    };

    let spec = spec.ok_or_else(|| anyhow!("job in {} has no ID", path.display()))?;
    debug!("Loaded job {} from {}", spec.id, path.display());

    Ok(spec)
}

/// Read the whole file; the handle is closed when this returns
async fn read_source(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut source = String::new();
    file.read_to_string(&mut source)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    Ok(source)
}

fn is_json(source: &str) -> bool {
    source.trim_start().starts_with('{')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fakes::FakeJobs;
    use serde_json::json;
    use std::io::Write;

    fn job_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_hcl_job() {
        let file = job_file("job \"web\" {\n  datacenters = [\"dc1\"]\n}\n");
        let jobs = FakeJobs {
            parsed: Some(json!({"ID": "web", "Name": "web"})),
            ..Default::default()
        };

        let spec = load_job(&jobs, file.path()).await.unwrap();
        assert_eq!(spec.id, "web");
        assert_eq!(jobs.calls(), vec!["parse"]);
    }

    #[tokio::test]
    async fn test_load_json_job_skips_agent() {
        let file = job_file(r#"{"Job": {"ID": "batch", "Type": "batch"}}"#);
        let jobs = FakeJobs::default();

        let spec = load_job(&jobs, file.path()).await.unwrap();
        assert_eq!(spec.id, "batch");
        assert_eq!(spec.job["Type"], "batch");
        assert!(jobs.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let jobs = FakeJobs::default();

        let err = load_job(&jobs, Path::new("/nonexistent/test.nomad"))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("failed to open /nonexistent/test.nomad"));
    }

    #[tokio::test]
    async fn test_relative_path_is_resolved() {
        let jobs = FakeJobs::default();

        let err = load_job(&jobs, Path::new("does-not-exist.nomad"))
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        let cwd = std::env::current_dir().unwrap();
        assert!(message.contains(&cwd.join("does-not-exist.nomad").display().to_string()));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let file = job_file(r#"{"Job": {"ID": "web""#);
        let jobs = FakeJobs::default();

        let err = load_job(&jobs, file.path()).await.unwrap_err();
        assert!(err.to_string().contains("invalid JSON job"));
    }

    #[tokio::test]
    async fn test_hcl_rejected() {
        let file = job_file("job {");
        let jobs = FakeJobs::default();

        let err = load_job(&jobs, file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid block definition"));
    }

    #[tokio::test]
    async fn test_job_without_id() {
        let file = job_file(r#"{"Type": "service"}"#);
        let jobs = FakeJobs::default();

        let err = load_job(&jobs, file.path()).await.unwrap_err();
        assert!(err.to_string().contains("has no ID"));
    }
}
