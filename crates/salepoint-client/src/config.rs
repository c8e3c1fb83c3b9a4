//! Client configuration

use crate::session::Session;

/// Client configuration for connecting to the POS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080/api")
    pub base_url: String,

    /// Session context (bearer token + role)
    pub session: Session,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Create a new configuration with an anonymous session and the
    /// default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session: Session::anonymous(),
            timeout_secs: 30,
        }
    }

    /// Set the session context
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
