//! Client configuration.
//!
//! `ClientConfig` represents the optional `config.toml` in the client's
//! config directory. All fields have defaults, so an empty or missing file
//! yields a working local setup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Backend address used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the booking backend, without the `/api` suffix.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Replace the backend URL when an override is present and non-blank.
    pub fn with_backend_override(mut self, backend_url: Option<&str>) -> Self {
        if let Some(url) = backend_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.backend_url = url.to_string();
        }
        self
    }

    /// The backend URL without trailing slashes, checked for an http(s) scheme.
    pub fn normalized_backend_url(&self) -> Result<String, ConfigError> {
        let url = self.backend_url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl(self.backend_url.clone()));
        }
        Ok(url.to_string())
    }
}
