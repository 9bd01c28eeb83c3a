//! Application constants
//!
//! Single source of truth for paths, endpoints and defaults.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/docintel.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Default Gemini endpoint
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";

/// Environment variable holding the Google API key
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Header carrying the Gemini API key
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// Reasoning budget applied when the caller does not set one (-1 = dynamic)
pub const DEFAULT_THINKING_BUDGET: i32 = -1;
