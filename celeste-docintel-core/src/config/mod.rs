pub mod error;
pub mod loader;
pub mod provider;

use std::path::Path;

pub use crate::constants::CONFIG_PATH;
pub use error::ConfigError;
pub use provider::ProviderSettings;

use crate::domain::types::Provider;

/// Explicit configuration handed to the factory and client constructors.
///
/// Several `Settings` values (for example with different credentials) can
/// coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub google: ProviderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google: ProviderSettings::google(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment after loading `.env` files.
    ///
    /// Values are validated the same way as the TOML file.
    pub fn from_env() -> Result<Self, ConfigError> {
        loader::ensure_env_loaded();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        loader::settings_from_lookup(lookup)
    }

    /// Load settings from a TOML file (default `config/docintel.toml`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        loader::load_settings(path)
    }

    pub fn provider(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::Google => &self.google,
        }
    }

    pub fn with_provider(mut self, provider: Provider, settings: ProviderSettings) -> Self {
        match provider {
            Provider::Google => self.google = settings,
        }
        self
    }
}
