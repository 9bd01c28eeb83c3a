//! Model types - options, generation config and error types

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::transport::Transport;
use crate::constants::DEFAULT_THINKING_BUDGET;

/// Generation knobs forwarded to the backend (unset fields use server defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub response_mime_type: Option<String>,
    /// Reasoning token budget; `-1` lets the model decide, `0` disables thinking
    pub thinking_budget: Option<i32>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: None,
            top_p: None,
            max_output_tokens: None,
            response_mime_type: None,
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }
}

/// Per-call options for `generate_content` and `stream_generate_content`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the client's default generation config for this call
    pub generation: Option<GenerationConfig>,
    pub system_instruction: Option<String>,
}

impl RequestOptions {
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Construction options forwarded by the factory to a client.
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Model id; falls back to the provider settings, then the provider default
    pub model: Option<String>,
    pub generation: Option<GenerationConfig>,
    /// Overrides the HTTP transport (tests, proxies, instrumentation)
    pub transport: Option<Arc<dyn Transport>>,
}

impl ClientOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

/// Coarse classification of [`DocError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedProvider,
    UnsupportedModel,
    Configuration,
    DocumentRead,
    InvalidDocumentType,
    Provider,
}

/// Document client errors
#[derive(Debug, Error)]
pub enum DocError {
    #[error("unsupported provider '{provider}'")]
    UnsupportedProvider { provider: String },
    #[error("model '{model}' is not available for provider '{provider}'")]
    UnsupportedModel { provider: String, model: String },
    #[error("provider '{provider}' requires an API key (set {env_var})")]
    MissingApiKey { provider: String, env_var: String },
    #[error("invalid configuration for provider '{provider}': {reason}")]
    Configuration { provider: String, reason: String },
    #[error("failed to read document {path:?}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unknown document type '{value}'")]
    UnknownMimeType { value: String },
    #[error("document type '{mime_type}' is not supported by provider '{provider}'")]
    InvalidDocumentType { provider: String, mime_type: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' returned status {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
    #[error("could not build request for provider '{provider}': {reason}")]
    InvalidRequest { provider: String, reason: String },
}

impl DocError {
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
        }
    }

    pub fn unsupported_model(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::UnsupportedModel {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn missing_api_key(provider: impl Into<String>, env_var: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
            env_var: env_var.into(),
        }
    }

    pub fn configuration(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn document_read(path: &Path, source: io::Error) -> Self {
        Self::DocumentRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn unknown_mime_type(value: impl Into<String>) -> Self {
        Self::UnknownMimeType {
            value: value.into(),
        }
    }

    pub fn invalid_document_type(provider: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::InvalidDocumentType {
            provider: provider.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_request(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DocError::UnsupportedProvider { .. } => ErrorKind::UnsupportedProvider,
            DocError::UnsupportedModel { .. } => ErrorKind::UnsupportedModel,
            DocError::MissingApiKey { .. } | DocError::Configuration { .. } => {
                ErrorKind::Configuration
            }
            DocError::DocumentRead { .. } => ErrorKind::DocumentRead,
            DocError::UnknownMimeType { .. } | DocError::InvalidDocumentType { .. } => {
                ErrorKind::InvalidDocumentType
            }
            DocError::Network { .. }
            | DocError::Status { .. }
            | DocError::InvalidResponse { .. }
            | DocError::InvalidRequest { .. } => ErrorKind::Provider,
        }
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self {
            DocError::UnsupportedProvider { provider } => {
                format!("Provider '{provider}' is not supported.")
            }
            DocError::UnsupportedModel { provider, model } => {
                format!("Model '{model}' is not available for provider '{provider}'.")
            }
            DocError::MissingApiKey { provider, env_var } => {
                format!("Provider '{provider}' needs an API key. Set {env_var} and try again.")
            }
            DocError::Configuration { provider, reason } => {
                format!("Provider '{provider}' is misconfigured: {reason}.")
            }
            DocError::DocumentRead { path, .. } => {
                format!("Could not read document '{}'.", path.display())
            }
            DocError::UnknownMimeType { value } => {
                format!("Document type '{value}' is not supported.")
            }
            DocError::InvalidDocumentType {
                provider,
                mime_type,
            } => format!("Provider '{provider}' cannot process '{mime_type}' documents."),
            DocError::Network { provider, source } => {
                if source.is_connect() {
                    format!("Could not connect to provider '{provider}'.")
                } else if source.is_timeout() {
                    format!("Request to '{provider}' timed out.")
                } else {
                    format!("Network error while calling '{provider}'.")
                }
            }
            DocError::Status {
                provider, status, ..
            } => match StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR) {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    format!("Provider '{provider}' rejected the API key.")
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    format!("Quota exceeded for provider '{provider}'. Try again later.")
                }
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    format!("Provider '{provider}' is currently unavailable.")
                }
                _ => format!("Request to '{provider}' failed with status {status}."),
            },
            DocError::InvalidResponse { provider, .. } => {
                format!("Response from '{provider}' could not be processed.")
            }
            DocError::InvalidRequest { provider, .. } => {
                format!("Request to '{provider}' could not be built.")
            }
        }
    }
}
