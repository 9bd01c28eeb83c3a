//! Core data types: documents, responses, usage and the closed identifier sets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::infrastructure::model::types::DocError;

/// MIME type enumeration for document and content type identification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MimeType {
    #[serde(rename = "application/pdf")]
    Pdf,
    #[serde(rename = "application/x-javascript")]
    Javascript,
    #[serde(rename = "text/javascript")]
    JavascriptText,
    #[serde(rename = "application/x-python")]
    Python,
    #[serde(rename = "text/x-python")]
    PythonText,
    #[serde(rename = "text/plain")]
    Text,
    #[serde(rename = "text/html")]
    Html,
    #[serde(rename = "text/css")]
    Css,
    #[serde(rename = "text/md")]
    Markdown,
    #[serde(rename = "text/csv")]
    Csv,
    #[serde(rename = "text/xml")]
    Xml,
    #[serde(rename = "text/rtf")]
    Rtf,
}

impl MimeType {
    pub const ALL: [MimeType; 12] = [
        MimeType::Pdf,
        MimeType::Javascript,
        MimeType::JavascriptText,
        MimeType::Python,
        MimeType::PythonText,
        MimeType::Text,
        MimeType::Html,
        MimeType::Css,
        MimeType::Markdown,
        MimeType::Csv,
        MimeType::Xml,
        MimeType::Rtf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Pdf => "application/pdf",
            MimeType::Javascript => "application/x-javascript",
            MimeType::JavascriptText => "text/javascript",
            MimeType::Python => "application/x-python",
            MimeType::PythonText => "text/x-python",
            MimeType::Text => "text/plain",
            MimeType::Html => "text/html",
            MimeType::Css => "text/css",
            MimeType::Markdown => "text/md",
            MimeType::Csv => "text/csv",
            MimeType::Xml => "text/xml",
            MimeType::Rtf => "text/rtf",
        }
    }

    /// Guess the MIME kind from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(MimeType::Pdf),
            "js" | "mjs" | "cjs" => Some(MimeType::JavascriptText),
            "py" => Some(MimeType::PythonText),
            "txt" | "text" | "log" => Some(MimeType::Text),
            "html" | "htm" => Some(MimeType::Html),
            "css" => Some(MimeType::Css),
            "md" | "markdown" => Some(MimeType::Markdown),
            "csv" => Some(MimeType::Csv),
            "xml" => Some(MimeType::Xml),
            "rtf" => Some(MimeType::Rtf),
            _ => None,
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = DocError;

    /// Parameters such as `; charset=utf-8` are ignored.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let essence = value.split(';').next().unwrap_or_default().trim();
        MimeType::ALL
            .into_iter()
            .find(|mime| mime.as_str().eq_ignore_ascii_case(essence))
            .ok_or_else(|| DocError::unknown_mime_type(value))
    }
}

/// Document intelligence providers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
}

impl Provider {
    pub const ALL: [Provider; 1] = [Provider::Google];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = DocError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "google" | "gemini" | "google-ai" => Ok(Provider::Google),
            _ => Err(DocError::unsupported_provider(value)),
        }
    }
}

/// Gemini models with document understanding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GeminiModel {
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    #[serde(rename = "gemini-2.5-flash-lite-preview-06-17")]
    Gemini25FlashLite,
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[serde(rename = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,
}

impl GeminiModel {
    pub const ALL: [GeminiModel; 5] = [
        GeminiModel::Gemini25Pro,
        GeminiModel::Gemini25Flash,
        GeminiModel::Gemini25FlashLite,
        GeminiModel::Gemini20Flash,
        GeminiModel::Gemini20FlashLite,
    ];

    pub const DEFAULT: GeminiModel = GeminiModel::Gemini25FlashLite;

    pub fn as_str(&self) -> &'static str {
        match self {
            GeminiModel::Gemini25Pro => "gemini-2.5-pro",
            GeminiModel::Gemini25Flash => "gemini-2.5-flash",
            GeminiModel::Gemini25FlashLite => "gemini-2.5-flash-lite-preview-06-17",
            GeminiModel::Gemini20Flash => "gemini-2.0-flash",
            GeminiModel::Gemini20FlashLite => "gemini-2.0-flash-lite",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GeminiModel::Gemini25Pro => "Gemini 2.5 Pro",
            GeminiModel::Gemini25Flash => "Gemini 2.5 Flash",
            GeminiModel::Gemini25FlashLite => "Gemini 2.5 Flash Lite (preview)",
            GeminiModel::Gemini20Flash => "Gemini 2.0 Flash",
            GeminiModel::Gemini20FlashLite => "Gemini 2.0 Flash Lite",
        }
    }

    /// Whether the model accepts a `thinkingConfig`; only the 2.5 series does.
    pub fn supports_thinking(&self) -> bool {
        matches!(
            self,
            GeminiModel::Gemini25Pro | GeminiModel::Gemini25Flash | GeminiModel::Gemini25FlashLite
        )
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            id: self.as_str(),
            display_name: self.display_name(),
        }
    }
}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeminiModel {
    type Err = DocError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        GeminiModel::ALL
            .into_iter()
            .find(|model| model.as_str() == value)
            .ok_or_else(|| DocError::unsupported_model(Provider::Google.as_str(), value))
    }
}

/// Catalogue entry for a model a provider can serve.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model identifier used in API calls
    pub id: &'static str,
    /// Human-readable name for front-ends
    pub display_name: &'static str,
}

/// A document on disk with its declared MIME kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub file_path: PathBuf,
    pub mime_type: MimeType,
}

impl Document {
    pub fn new(file_path: impl Into<PathBuf>, mime_type: MimeType) -> Self {
        Self {
            file_path: file_path.into(),
            mime_type,
        }
    }

    /// Build a document whose MIME kind is inferred from the file extension.
    pub fn from_path(file_path: impl Into<PathBuf>) -> Result<Self, DocError> {
        let file_path = file_path.into();
        let extension = file_path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let mime_type = MimeType::from_extension(extension)
            .ok_or_else(|| DocError::unknown_mime_type(format!("*.{extension}")))?;
        Ok(Self {
            file_path,
            mime_type,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, DocError> {
        tokio::fs::read(&self.file_path)
            .await
            .map_err(|source| DocError::document_read(&self.file_path, source))
    }
}

/// Normalized token usage.
///
/// `total_tokens` is what the provider reported; it is not guaranteed to be
/// `input_tokens + output_tokens`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AIUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

impl AIUsage {
    pub fn new(input_tokens: u32, output_tokens: u32, total_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Provider-agnostic response.
///
/// Either `text` is non-empty, or the value is the usage-only marker that
/// ends a stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AIResponse {
    pub text: String,
    #[serde(default)]
    pub usage: Option<AIUsage>,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl AIResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Terminal stream entry carrying only aggregate usage.
    pub fn usage_marker(usage: AIUsage) -> Self {
        Self {
            usage: Some(usage),
            ..Self::default()
        }
    }

    pub fn with_usage(mut self, usage: Option<AIUsage>) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_usage_marker(&self) -> bool {
        self.text.is_empty() && self.usage.is_some()
    }
}
