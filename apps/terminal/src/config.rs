//! Terminal configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;

/// Terminal configuration.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Base URL of the POS REST backend
    pub base_url: String,

    /// Bearer token for the backend (optional; anonymous when unset)
    pub token: Option<String>,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Catalog page size for the one-shot fetch
    pub page_size: i64,
}

impl TerminalConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = TerminalConfig {
            base_url: env::var("SALEPOINT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),

            token: env::var("SALEPOINT_TOKEN").ok().filter(|t| !t.trim().is_empty()),

            http_timeout_secs: env::var("SALEPOINT_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SALEPOINT_HTTP_TIMEOUT_SECS".to_string()))?,

            page_size: env::var("SALEPOINT_PAGE_SIZE")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SALEPOINT_PAGE_SIZE".to_string()))?,
        };

        if config.base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("SALEPOINT_BASE_URL".to_string()));
        }
        if config.page_size <= 0 {
            return Err(ConfigError::InvalidValue("SALEPOINT_PAGE_SIZE".to_string()));
        }

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
