//! Provider wiring for document intelligence clients

use super::clients::GeminiDocClient;
use super::traits::DocClient;
use super::types::{ClientOptions, DocError};
use crate::config::ProviderSettings;
use crate::domain::types::{GeminiModel, ModelInfo, Provider};

/// Builds a client from its provider settings and caller options.
pub type ClientConstructor =
    fn(&ProviderSettings, ClientOptions) -> Result<Box<dyn DocClient>, DocError>;

/// One row of the provider table.
pub struct ProviderEntry {
    pub provider: Provider,
    pub construct: ClientConstructor,
    pub models: fn() -> Vec<ModelInfo>,
}

fn gemini_models() -> Vec<ModelInfo> {
    GeminiModel::ALL.iter().map(GeminiModel::info).collect()
}

/// Static, read-only provider table. Adding a provider is a new row.
pub static PROVIDER_MAPPING: &[ProviderEntry] = &[ProviderEntry {
    provider: Provider::Google,
    construct: GeminiDocClient::boxed,
    models: gemini_models,
}];

pub fn entry(provider: Provider) -> Option<&'static ProviderEntry> {
    PROVIDER_MAPPING
        .iter()
        .find(|entry| entry.provider == provider)
}
