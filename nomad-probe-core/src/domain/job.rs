//! Job specification domain types

use serde_json::Value;

/// A job ready for submission
///
/// The job body is Nomad's API JSON representation and is passed through
/// untouched; only the identifier is extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSpec {
    pub id: String,
    pub job: Value,
}

impl JobSpec {
    /// Build a spec from an API job object
    ///
    /// The identifier is the `ID` field, falling back to `Name` the way Nomad
    /// canonicalizes jobs. Returns `None` when neither is a non-empty string.
    pub fn from_api_job(job: Value) -> Option<Self> {
        let id = ["ID", "Name"]
            .iter()
            .filter_map(|key| job.get(*key).and_then(Value::as_str))
            .find(|s| !s.is_empty())?
            .to_string();

        Some(Self { id, job })
    }

    /// Build a spec from a JSON job document
    ///
    /// Accepts both the wrapped form used by `nomad job run -json`
    /// (`{"Job": {...}}`) and a bare job object.
    pub fn from_document(document: Value) -> Option<Self> {
        match document {
            Value::Object(mut map) if map.contains_key("Job") => {
                let job = map.remove("Job")?;
                Self::from_api_job(job)
            }
            Value::Object(_) => Self::from_api_job(document),
            _ => None,
        }
    }
}
