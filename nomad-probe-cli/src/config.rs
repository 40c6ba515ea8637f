//! Configuration module
//!
//! Holds the settings of one check run. Built once from the command line
//! and passed by reference to every step.

use std::path::PathBuf;
use std::time::Duration;

use nomad_probe_client::{ClientConfig, TlsConfig};

/// Default Nomad agent address
pub const DEFAULT_ADDR: &str = "http://127.0.0.1:4646";

/// Default job specification file
pub const DEFAULT_JOB_FILE: &str = "test.nomad";

/// Default time to wait for the job before reporting a timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Check configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address of the Nomad agent
    pub addr: String,

    /// Client certificate for mutual TLS
    pub tls_cert: Option<PathBuf>,

    /// Client key for mutual TLS
    pub tls_key: Option<PathBuf>,

    /// CA bundle used to verify the Nomad server certificate
    pub tls_ca_cert: Option<PathBuf>,

    /// Skip server certificate verification
    pub tls_insecure: bool,

    /// Maximum time to wait for a decisive allocation status
    ///
    /// `None` for a negative timeout: the check times out before polling.
    pub timeout: Option<Duration>,

    /// Job specification to submit
    pub file: PathBuf,

    /// Existing job to watch instead of submitting `file`
    pub check: Option<String>,

    /// ACL token
    pub token: Option<String>,

    /// Nomad namespace
    pub namespace: Option<String>,

    /// Nomad region
    pub region: Option<String>,
}

impl Config {
    /// Job ID to watch in check-only mode, if any
    pub fn check_only(&self) -> Option<&str> {
        self.check.as_deref().filter(|id| !id.is_empty())
    }

    /// Mutual TLS settings
    ///
    /// Client authentication is only enabled when both certificate and key
    /// are set; the CA bundle and insecure flag ride along with them.
    pub fn tls(&self) -> Option<TlsConfig> {
        match (&self.tls_cert, &self.tls_key) {
            (Some(cert), Some(key)) => Some(TlsConfig {
                ca_cert: self.tls_ca_cert.clone(),
                client_cert: cert.clone(),
                client_key: key.clone(),
                insecure: self.tls_insecure,
            }),
            _ => None,
        }
    }

    /// Connection settings for the Nomad client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            address: self.addr.clone(),
            tls: self.tls(),
            token: self.token.clone(),
            namespace: self.namespace.clone(),
            region: self.region.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            tls_cert: None,
            tls_key: None,
            tls_ca_cert: None,
            tls_insecure: false,
            timeout: Some(DEFAULT_TIMEOUT),
            file: PathBuf::from(DEFAULT_JOB_FILE),
            check: None,
            token: None,
            namespace: None,
            region: None,
        }
    }
}
