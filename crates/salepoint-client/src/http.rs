//! HTTP client for network-based API calls
//!
//! One place decodes the backend envelope and maps failures:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Envelope handling                                                      │
//! │                                                                         │
//! │  non-2xx HTTP  ──► ClientError::Backend(errorDescription | statusText) │
//! │  status: false ──► ClientError::Backend(errorDescription | fallback)   │
//! │  status: true  ──► Ok(responseDto)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

// =============================================================================
// Envelope
// =============================================================================

/// The backend's uniform response wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// `false` marks a handled backend failure even on a 2xx response.
    #[serde(default = "default_status")]
    pub status: bool,

    /// Backend-specific error code; opaque to this client.
    #[serde(default)]
    pub error_code: Option<serde_json::Value>,

    /// Human-readable failure description.
    #[serde(default)]
    pub error_description: Option<String>,

    /// The payload, present on success.
    #[serde(default = "none")]
    pub response_dto: Option<T>,
}

// An absent `status` field counts as success; only an explicit `false` fails.
fn default_status() -> bool {
    true
}

fn none<T>() -> Option<T> {
    None
}

// =============================================================================
// HTTP Client
// =============================================================================

/// HTTP client for making network requests to the POS backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session: config.session.clone(),
        })
    }

    /// The session context this client attaches to every request
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the session context (e.g., after sign-in)
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request with query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let mut request = self.client.get(&url).query(query);
        if let Some(auth) = self.session.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(auth) = self.session.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Decode the envelope and map failures
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            // Prefer the backend's own description when the error body still
            // carries a parseable envelope
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(&bytes)
                .ok()
                .and_then(|e| e.error_description)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Request failed")
                        .to_string()
                });
            return Err(ClientError::Backend(message));
        }

        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;

        if !envelope.status {
            return Err(envelope
                .error_description
                .map(ClientError::Backend)
                .unwrap_or_else(ClientError::request_failed));
        }

        envelope
            .response_dto
            .ok_or_else(|| ClientError::InvalidResponse("Missing responseDto".to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let json = r#"{"status":true,"errorCode":null,"errorDescription":null,"responseDto":{"id":1}}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.response_dto.unwrap()["id"], 1);
    }

    #[test]
    fn test_envelope_missing_status_counts_as_success() {
        let json = r#"{"responseDto":[]}"#;
        let envelope: Envelope<Vec<i64>> = serde_json::from_str(json).unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.response_dto.unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_envelope_failure_keeps_description() {
        let json = r#"{"status":false,"errorCode":"E_STOCK","errorDescription":"Not enough stock"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.error_description.as_deref(), Some("Not enough stock"));
        assert!(envelope.response_dto.is_none());
    }
}
