//! # Provider Settings
//!
//! Connection settings for one document intelligence provider.
//!
//! | Provider | Credential variable | API key required |
//! |----------|---------------------|------------------|
//! | `google` | `GOOGLE_API_KEY`    | Yes              |

use std::fmt;
use std::time::Duration;

use crate::constants::{DEFAULT_GEMINI_API_PATH, DEFAULT_GEMINI_ENDPOINT, GOOGLE_API_KEY_ENV};

/// Settings for a single provider.
///
/// # Example
///
/// ```toml
/// [google]
/// api_key_env = "GOOGLE_API_KEY"
/// endpoint = "https://generativelanguage.googleapis.com"
/// api_path = "v1beta/models"
/// model = "gemini-2.5-flash"
/// timeout_secs = 120
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Resolved API key
    pub api_key: Option<String>,
    /// Environment variable the key is read from
    pub api_key_env: String,
    /// API endpoint URL
    pub endpoint: String,
    /// Path between the endpoint and the model id
    pub api_path: String,
    /// Default model when the caller names none
    pub model: Option<String>,
    /// Whole-request timeout; none by default
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    pub fn google() -> Self {
        Self {
            api_key: None,
            api_key_env: GOOGLE_API_KEY_ENV.to_string(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            api_path: DEFAULT_GEMINI_API_PATH.to_string(),
            model: None,
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// The API key, if present and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("api_key_env", &self.api_key_env)
            .field("endpoint", &self.endpoint)
            .field("api_path", &self.api_path)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}
