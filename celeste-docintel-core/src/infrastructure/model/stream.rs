//! Streamed response helpers

use futures::StreamExt;
use futures::stream::BoxStream;

use super::types::DocError;
use crate::domain::types::AIResponse;

/// Lazy, ordered sequence of streamed responses.
pub type AIResponseStream = BoxStream<'static, Result<AIResponse, DocError>>;

/// Drain a stream into one response.
///
/// Text is concatenated in order, the trailing usage marker (if any) becomes
/// the usage, and provider/metadata come from the first chunk.
pub async fn collect_response(mut stream: AIResponseStream) -> Result<AIResponse, DocError> {
    let mut combined: Option<AIResponse> = None;
    let mut usage = None;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if chunk.is_usage_marker() {
            usage = chunk.usage;
            continue;
        }
        match combined.as_mut() {
            Some(response) => response.text.push_str(&chunk.text),
            None => combined = Some(chunk),
        }
    }

    Ok(combined.unwrap_or_default().with_usage(usage))
}
