//! Document client contract

use async_trait::async_trait;
use serde_json::Value;

use super::stream::AIResponseStream;
use super::types::{DocError, RequestOptions};
use crate::domain::types::{AIResponse, AIUsage, Document, MimeType, Provider};

/// Capability surface every document intelligence provider implements.
#[async_trait]
pub trait DocClient: Send + Sync {
    /// Provider serving this client
    fn provider(&self) -> Provider;

    /// Model id used for requests
    fn model(&self) -> &str;

    /// MIME kinds the backend accepts as attachments
    fn supported_mime_types(&self) -> &'static [MimeType];

    /// Generate a single response from a prompt and attached documents.
    async fn generate_content(
        &self,
        prompt: &str,
        documents: &[Document],
        options: RequestOptions,
    ) -> Result<AIResponse, DocError>;

    /// Stream the response chunk by chunk.
    ///
    /// Text chunks arrive in emission order. When the backend reports usage,
    /// one usage-only response with empty text follows the last chunk.
    async fn stream_generate_content(
        &self,
        prompt: &str,
        documents: &[Document],
        options: RequestOptions,
    ) -> Result<AIResponseStream, DocError>;

    /// Convert provider-specific usage data to [`AIUsage`].
    fn format_usage(&self, usage: Option<&Value>) -> Option<AIUsage>;
}
