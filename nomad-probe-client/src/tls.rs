//! TLS material loading for mutual TLS against the Nomad API.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::{Certificate, ClientBuilder, Identity};

/// Error type for TLS configuration issues.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("client certificate not found: {0}")]
    CertNotFound(PathBuf),

    #[error("client key not found: {0}")]
    KeyNotFound(PathBuf),

    #[error("CA certificate not found: {0}")]
    CaCertNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid client certificate or key: {0}")]
    InvalidIdentity(reqwest::Error),

    #[error("invalid CA certificate: {0}")]
    InvalidCaCert(reqwest::Error),
}

/// Client TLS settings
///
/// Only built when both a client certificate and key are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// CA bundle used to verify the server certificate
    pub ca_cert: Option<PathBuf>,
    /// PEM client certificate
    pub client_cert: PathBuf,
    /// PEM client private key
    pub client_key: PathBuf,
    /// Skip server certificate verification
    pub insecure: bool,
}

impl TlsConfig {
    /// Load the PEM files and attach them to a client builder.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured file does not exist, cannot be
    /// read, or does not contain valid PEM material.
    pub fn apply(&self, builder: ClientBuilder) -> Result<ClientBuilder, TlsError> {
        if !self.client_cert.exists() {
            return Err(TlsError::CertNotFound(self.client_cert.clone()));
        }
        if !self.client_key.exists() {
            return Err(TlsError::KeyNotFound(self.client_key.clone()));
        }

        // rustls expects certificate chain and key in one PEM buffer
        let mut pem = read(&self.client_cert)?;
        pem.push(b'\n');
        pem.extend(read(&self.client_key)?);
        let identity = Identity::from_pem(&pem).map_err(TlsError::InvalidIdentity)?;

        let mut builder = builder
            .use_rustls_tls()
            .identity(identity)
            .danger_accept_invalid_certs(self.insecure);

        if let Some(ca_path) = &self.ca_cert {
            if !ca_path.exists() {
                return Err(TlsError::CaCertNotFound(ca_path.clone()));
            }
            let bundle = read(ca_path)?;
            for cert in Certificate::from_pem_bundle(&bundle).map_err(TlsError::InvalidCaCert)? {
                builder = builder.add_root_certificate(cert);
            }
        }

        Ok(builder)
    }
}

fn read(path: &Path) -> Result<Vec<u8>, TlsError> {
    fs::read(path).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config(cert: PathBuf, key: PathBuf, ca: Option<PathBuf>) -> TlsConfig {
        TlsConfig {
            ca_cert: ca,
            client_cert: cert,
            client_key: key,
            insecure: false,
        }
    }

    #[test]
    fn test_missing_client_cert() {
        let tls = config(
            PathBuf::from("/nonexistent/client.pem"),
            PathBuf::from("/nonexistent/client-key.pem"),
            None,
        );

        let result = tls.apply(reqwest::Client::builder());
        assert!(matches!(result, Err(TlsError::CertNotFound(_))));
    }

    #[test]
    fn test_missing_client_key() {
        let cert = tempfile::NamedTempFile::new().unwrap();
        let tls = config(
            cert.path().to_path_buf(),
            PathBuf::from("/nonexistent/client-key.pem"),
            None,
        );

        let result = tls.apply(reqwest::Client::builder());
        assert!(matches!(result, Err(TlsError::KeyNotFound(_))));
    }

    #[test]
    fn test_garbage_pem_is_rejected() {
        let mut cert = tempfile::NamedTempFile::new().unwrap();
        writeln!(cert, "not a certificate").unwrap();
        let mut key = tempfile::NamedTempFile::new().unwrap();
        writeln!(key, "not a key").unwrap();

        let tls = config(cert.path().to_path_buf(), key.path().to_path_buf(), None);

        let result = tls.apply(reqwest::Client::builder());
        assert!(matches!(result, Err(TlsError::InvalidIdentity(_))));
    }
}
