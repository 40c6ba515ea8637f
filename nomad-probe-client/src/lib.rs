//! Nomad HTTP Client
//!
//! A small, type-safe client for the parts of the Nomad HTTP API the probe
//! needs: parsing, registering and purging jobs, and listing allocations.
//!
//! # Example
//!
//! ```no_run
//! use nomad_probe_client::{ClientConfig, NomadClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NomadClient::new(&ClientConfig::new("http://127.0.0.1:4646"))?;
//!
//!     let allocations = client.list_allocations(true).await?;
//!     println!("{} allocation(s)", allocations.len());
//!     Ok(())
//! }
//! ```

mod allocations;
pub mod error;
mod jobs;
pub mod tls;

#[cfg(test)]
mod stub;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use tls::{TlsConfig, TlsError};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Header carrying the Nomad ACL token
const TOKEN_HEADER: &str = "x-nomad-token";

/// Connection settings for [`NomadClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the Nomad agent (e.g., "http://127.0.0.1:4646")
    pub address: String,
    /// Mutual TLS settings, if client authentication is enabled
    pub tls: Option<TlsConfig>,
    /// ACL token sent with every request
    pub token: Option<String>,
    /// Target namespace
    pub namespace: Option<String>,
    /// Target region
    pub region: Option<String>,
}

impl ClientConfig {
    /// Plain settings for an address, without TLS or ACL token
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            tls: None,
            token: None,
            namespace: None,
            region: None,
        }
    }
}

/// HTTP client for the Nomad API
///
/// Building a client performs no network traffic.
#[derive(Debug, Clone)]
pub struct NomadClient {
    /// Base URL of the Nomad agent
    base_url: Url,
    /// Query parameters added to every request (namespace, region)
    scope: Vec<(&'static str, String)>,
    /// HTTP client instance
    client: Client,
}

impl NomadClient {
    /// Create a new Nomad client
    ///
    /// # Errors
    /// Returns an error if:
    /// - The address is not an absolute http(s) URL
    /// - TLS material is configured but cannot be loaded
    /// - The ACL token is not a valid header value
    /// - The underlying HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_address(&config.address)?;

        let mut builder = Client::builder();

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(token)
                .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);

            let mut headers = HeaderMap::new();
            headers.insert(TOKEN_HEADER, value);
            builder = builder.default_headers(headers);
        }

        if let Some(tls) = &config.tls {
            debug!(
                "Using client certificate {} for mutual TLS",
                tls.client_cert.display()
            );
            builder = tls.apply(builder)?;
        }

        let mut scope = Vec::new();
        if let Some(namespace) = config.namespace.as_deref().filter(|s| !s.is_empty()) {
            scope.push(("namespace", namespace.to_string()));
        }
        if let Some(region) = config.region.as_deref().filter(|s| !s.is_empty()) {
            scope.push(("region", region.to_string()));
        }

        Ok(Self {
            base_url,
            scope,
            client: builder.build()?,
        })
    }

    /// Get the base URL of the Nomad agent
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are percent-encoded, so job IDs may contain any character.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attach the namespace/region scope to a request
    fn scoped(&self, request: RequestBuilder) -> RequestBuilder {
        if self.scope.is_empty() {
            request
        } else {
            request.query(&self.scope)
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text.trim()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Validate the configured address as a base URL
fn parse_address(address: &str) -> Result<Url> {
    let invalid = |reason: String| ClientError::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    let url = Url::parse(address).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }

    Ok(url)
}
