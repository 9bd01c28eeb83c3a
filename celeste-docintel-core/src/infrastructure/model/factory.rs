//! Client factory - resolves a provider identifier to a document client

use tracing::{debug, info};

use super::mapping::{self, PROVIDER_MAPPING};
use super::traits::DocClient;
use super::types::{ClientOptions, DocError};
use crate::config::Settings;
use crate::domain::types::{ModelInfo, Provider};

/// Factory for creating document clients from settings.
pub struct DocClientFactory;

impl DocClientFactory {
    /// Creates a client for `provider`.
    ///
    /// Checks, in order: the provider has a mapping entry, its API key is
    /// configured, then constructs the client (which validates the model).
    pub fn create(
        provider: Provider,
        settings: &Settings,
        options: ClientOptions,
    ) -> Result<Box<dyn DocClient>, DocError> {
        let entry = mapping::entry(provider)
            .ok_or_else(|| DocError::unsupported_provider(provider.as_str()))?;

        let provider_settings = settings.provider(provider);
        if provider_settings.api_key().is_none() {
            return Err(DocError::missing_api_key(
                provider.as_str(),
                &provider_settings.api_key_env,
            ));
        }

        debug!(
            provider = provider.as_str(),
            model = ?options.model,
            "Constructing document client"
        );
        let client = (entry.construct)(provider_settings, options)?;
        info!(
            provider = provider.as_str(),
            model = client.model(),
            "Document client ready"
        );
        Ok(client)
    }
}

/// Resolve a provider name (e.g. `"google"`) to a document client.
pub fn create_doc_client(
    provider: &str,
    settings: &Settings,
    options: ClientOptions,
) -> Result<Box<dyn DocClient>, DocError> {
    let provider = provider.parse::<Provider>()?;
    DocClientFactory::create(provider, settings, options)
}

/// Providers with a registered implementation.
pub fn supported_providers() -> Vec<Provider> {
    PROVIDER_MAPPING.iter().map(|entry| entry.provider).collect()
}

/// Model catalogue for a provider.
pub fn list_models(provider: Provider) -> Vec<ModelInfo> {
    mapping::entry(provider)
        .map(|entry| (entry.models)())
        .unwrap_or_default()
}
