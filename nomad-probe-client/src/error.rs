//! Error types for the Nomad client

use thiserror::Error;

use crate::tls::TlsError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Nomad client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured address is not a usable base URL
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The address as given
        address: String,
        /// Why it was rejected
        reason: String,
    },

    /// TLS material could not be loaded
    #[error("TLS configuration error: {0}")]
    Tls(#[from] TlsError),

    /// The ACL token cannot be sent as a header value
    #[error("Invalid ACL token: {0}")]
    InvalidToken(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ClientError::api_error(404, "job not found").is_not_found());
        assert!(!ClientError::api_error(500, "boom").is_not_found());
        assert!(!ClientError::ParseError("x".to_string()).is_not_found());
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::api_error(500, "rpc error: No cluster leader");
        assert_eq!(
            err.to_string(),
            "API error (status 500): rpc error: No cluster leader"
        );
    }
}
