use super::error::ConfigError;
use super::provider::ProviderSettings;
use super::Settings;
use crate::constants::{CONFIG_PATH, ENV_PATH};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, warn};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawSettings {
    #[serde(default)]
    pub google: Option<RawProviderSettings>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct RawProviderSettings {
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub endpoint: Option<String>,
    pub api_path: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env and .env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
        let _ = dotenvy::dotenv();
    });
}

/// Build settings from environment variables supplied by `lookup`.
///
/// The variables are mapped onto the `[google]` table and validated like a
/// configuration file.
pub(super) fn settings_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let timeout_secs = lookup("GOOGLE_TIMEOUT_SECS")
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "GOOGLE_TIMEOUT_SECS".to_string(),
                    reason: format!("'{raw}' is not a whole number of seconds"),
                })
        })
        .transpose()?;

    let raw = RawSettings {
        google: Some(RawProviderSettings {
            endpoint: lookup("GOOGLE_API_ENDPOINT"),
            api_path: lookup("GOOGLE_API_PATH"),
            model: lookup("GOOGLE_MODEL"),
            timeout_secs,
            ..RawProviderSettings::default()
        }),
    };
    validate_and_build(raw, &lookup)
}

/// Load and validate settings from a file path
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

/// Load settings from `path`, resolving `api_key_env` through `lookup`.
pub fn load_settings_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    debug!(path = %path.display(), "Reading document intelligence configuration");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let parsed: RawSettings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed, lookup)
}

pub(super) fn validate_and_build(
    parsed: RawSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let raw = parsed.google.unwrap_or_default();
    let mut google = ProviderSettings::google();

    if let Some(api_key_env) = raw.api_key_env {
        google.api_key_env = api_key_env;
    }
    google.api_key = raw
        .api_key
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            let resolved = lookup(&google.api_key_env);
            if resolved.is_none() {
                warn!(
                    provider = "google",
                    env_var = google.api_key_env.as_str(),
                    "API key environment variable is not set"
                );
            }
            resolved
        });

    if let Some(endpoint) = raw.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "google.endpoint".to_string(),
                reason: format!("'{endpoint}' is not an http(s) URL"),
            });
        }
        google.endpoint = endpoint;
    }
    if let Some(api_path) = raw.api_path {
        google.api_path = api_path;
    }
    google.model = raw.model;
    google.timeout = match raw.timeout_secs {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "google.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    Ok(Settings { google })
}
