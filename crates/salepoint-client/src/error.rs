//! Client error types

use thiserror::Error;

/// Client error type
///
/// Everything here is recoverable by the calling component: the catalog cache
/// falls back to empty, the checkout coordinator surfaces the message and
/// keeps the ledger intact.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connection, timeout, TLS, malformed transport)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend envelope reported failure (`status: false` or a non-2xx
    /// response). Carries the `errorDescription` or a generic fallback.
    #[error("{0}")]
    Backend(String),

    /// Response body did not match the expected envelope shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// The generic fallback used when the backend gives no description.
    pub(crate) fn request_failed() -> Self {
        ClientError::Backend("Request failed".to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
