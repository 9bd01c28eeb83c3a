//! Gemini document client

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::base::HttpTransport;
use crate::config::ProviderSettings;
use crate::constants::GEMINI_API_KEY_HEADER;
use crate::domain::types::{AIResponse, AIUsage, Document, GeminiModel, MimeType, Provider};
use crate::infrastructure::model::stream::AIResponseStream;
use crate::infrastructure::model::traits::DocClient;
use crate::infrastructure::model::transport::{JsonStream, Transport, TransportRequest};
use crate::infrastructure::model::types::{
    ClientOptions, DocError, GenerationConfig, RequestOptions,
};

const PROVIDER_ID: &str = "google";

/// Gemini accepts every kind in the enumeration.
static GEMINI_MIME_TYPES: [MimeType; 12] = MimeType::ALL;

/// Document client for Google Gemini
#[derive(Clone)]
pub struct GeminiDocClient {
    model: GeminiModel,
    endpoint: String,
    api_path: String,
    api_key: String,
    generation: GenerationConfig,
    transport: Arc<dyn Transport>,
}

impl GeminiDocClient {
    /// Fails with a configuration error before any network use when the API
    /// key is missing.
    pub fn new(settings: &ProviderSettings, options: ClientOptions) -> Result<Self, DocError> {
        let api_key = settings
            .api_key()
            .ok_or_else(|| DocError::missing_api_key(PROVIDER_ID, &settings.api_key_env))?
            .to_string();

        let model = match options.model.or_else(|| settings.model.clone()) {
            Some(name) => name.parse::<GeminiModel>()?,
            None => GeminiModel::DEFAULT,
        };

        let transport: Arc<dyn Transport> = match options.transport {
            Some(transport) => transport,
            None => Arc::new(
                HttpTransport::with_timeout(settings.timeout)
                    .map_err(|err| DocError::configuration(PROVIDER_ID, err.to_string()))?,
            ),
        };

        debug!(
            provider = PROVIDER_ID,
            model = model.as_str(),
            endpoint = settings.endpoint.as_str(),
            "Gemini document client created"
        );

        Ok(Self {
            model,
            endpoint: settings.endpoint.clone(),
            api_path: settings.api_path.clone(),
            api_key,
            generation: options.generation.unwrap_or_default(),
            transport,
        })
    }

    pub(crate) fn boxed(
        settings: &ProviderSettings,
        options: ClientOptions,
    ) -> Result<Box<dyn DocClient>, DocError> {
        Ok(Box::new(Self::new(settings, options)?))
    }

    fn build_model_url(&self, method: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        format!("{base}/{path}/{}:{method}", self.model.as_str())
    }

    fn request(&self, method: &str, body: Value) -> TransportRequest {
        TransportRequest::new(PROVIDER_ID, self.build_model_url(method), body)
            .header(GEMINI_API_KEY_HEADER, self.api_key.as_str())
    }

    /// Reads every document and assembles the request body.
    async fn build_body(
        &self,
        prompt: &str,
        documents: &[Document],
        options: &RequestOptions,
    ) -> Result<Value, DocError> {
        let mut parts = Vec::with_capacity(documents.len() + 1);
        parts.push(GeminiPart::Text {
            text: prompt.to_string(),
        });

        for document in documents {
            if !self.supported_mime_types().contains(&document.mime_type) {
                return Err(DocError::invalid_document_type(
                    PROVIDER_ID,
                    document.mime_type.as_str(),
                ));
            }
            let bytes = document.read_bytes().await?;
            debug!(
                path = %document.file_path.display(),
                mime_type = document.mime_type.as_str(),
                bytes = bytes.len(),
                "Attaching document"
            );
            parts.push(GeminiPart::InlineData {
                inline_data: GeminiBlob {
                    mime_type: document.mime_type.as_str(),
                    data: BASE64.encode(bytes),
                },
            });
        }

        let generation = options.generation.as_ref().unwrap_or(&self.generation);
        let mut generation_config = GeminiGenerationConfig::from(generation);
        if !self.model.supports_thinking() {
            generation_config.thinking_config = None;
        }
        let payload = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts,
            }],
            system_instruction: options.system_instruction.as_ref().map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart::Text { text: text.clone() }],
            }),
            generation_config,
        };

        serde_json::to_value(&payload)
            .map_err(|err| DocError::invalid_request(PROVIDER_ID, err.to_string()))
    }

    fn response_for(&self, text: String) -> AIResponse {
        AIResponse::new(text)
            .with_provider(Provider::Google)
            .with_metadata("model", self.model.as_str())
    }
}

#[async_trait]
impl DocClient for GeminiDocClient {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn model(&self) -> &str {
        self.model.as_str()
    }

    fn supported_mime_types(&self) -> &'static [MimeType] {
        &GEMINI_MIME_TYPES
    }

    async fn generate_content(
        &self,
        prompt: &str,
        documents: &[Document],
        options: RequestOptions,
    ) -> Result<AIResponse, DocError> {
        let body = self.build_body(prompt, documents, &options).await?;

        info!(
            provider = PROVIDER_ID,
            model = self.model.as_str(),
            documents = documents.len(),
            "Sending request to Gemini"
        );

        let value = self.transport.post_json(self.request("generateContent", body)).await?;
        let response = parse_response(value)?;
        debug!("Received response from Gemini");

        let text = response.text();
        if text.is_empty() {
            return Err(DocError::invalid_response(PROVIDER_ID, "missing text"));
        }

        let mut result = self
            .response_for(text)
            .with_usage(self.format_usage(response.usage_metadata.as_ref()));
        if let Some(reason) = response.finish_reason() {
            result = result.with_metadata("finish_reason", reason);
        }
        if let Some(version) = response.model_version {
            result = result.with_metadata("model_version", version);
        }
        Ok(result)
    }

    async fn stream_generate_content(
        &self,
        prompt: &str,
        documents: &[Document],
        options: RequestOptions,
    ) -> Result<AIResponseStream, DocError> {
        let body = self.build_body(prompt, documents, &options).await?;

        info!(
            provider = PROVIDER_ID,
            model = self.model.as_str(),
            documents = documents.len(),
            "Streaming request to Gemini"
        );

        let events = self
            .transport
            .post_stream(self.request("streamGenerateContent?alt=sse", body))
            .await?;
        Ok(response_stream(self.clone(), events))
    }

    fn format_usage(&self, usage: Option<&Value>) -> Option<AIUsage> {
        usage_from_metadata(usage)
    }
}

struct StreamState {
    client: GeminiDocClient,
    events: JsonStream,
    usage: Option<AIUsage>,
    finished: bool,
}

/// Turns Gemini stream events into text chunks, then appends one usage-only
/// response built from the last usage the backend reported.
fn response_stream(client: GeminiDocClient, events: JsonStream) -> AIResponseStream {
    let state = StreamState {
        client,
        events,
        usage: None,
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        if state.finished {
            return None;
        }
        loop {
            let Some(event) = state.events.next().await else {
                state.finished = true;
                let usage = state.usage.take()?;
                debug!(
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "Gemini stream finished"
                );
                let marker = AIResponse::usage_marker(usage)
                    .with_provider(Provider::Google)
                    .with_metadata("model", state.client.model.as_str())
                    .with_metadata("is_stream_chunk", true);
                return Some((Ok(marker), state));
            };

            match event.and_then(parse_response) {
                Ok(chunk) => {
                    if let Some(usage) = state.client.format_usage(chunk.usage_metadata.as_ref()) {
                        state.usage = Some(usage);
                    }
                    let text = chunk.text();
                    if text.is_empty() {
                        continue;
                    }
                    let mut response = state
                        .client
                        .response_for(text)
                        .with_metadata("is_stream_chunk", true);
                    if let Some(reason) = chunk.finish_reason() {
                        response = response.with_metadata("finish_reason", reason);
                    }
                    return Some((Ok(response), state));
                }
                Err(err) => {
                    state.finished = true;
                    return Some((Err(err), state));
                }
            }
        }
    })
    .boxed()
}

/// Missing or non-numeric counters default to zero; oversized ones saturate.
fn usage_from_metadata(raw: Option<&Value>) -> Option<AIUsage> {
    let raw = raw.filter(|value| !value.is_null())?;
    let count = |field: &str| {
        raw.get(field)
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0)
    };
    Some(AIUsage::new(
        count("promptTokenCount"),
        count("candidatesTokenCount"),
        count("totalTokenCount"),
    ))
}

fn parse_response(value: Value) -> Result<GeminiResponse, DocError> {
    let response: GeminiResponse = serde_json::from_value(value)
        .map_err(|err| DocError::invalid_response(PROVIDER_ID, err.to_string()))?;
    if let Some(error) = response.error {
        return Err(DocError::Status {
            provider: PROVIDER_ID.to_string(),
            status: error.code.unwrap_or(500),
            message: error.message,
        });
    }
    Ok(response)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiBlob,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiBlob {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<GeminiThinkingConfig>,
}

impl From<&GenerationConfig> for GeminiGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            response_mime_type: config.response_mime_type.clone(),
            thinking_config: config
                .thinking_budget
                .map(|thinking_budget| GeminiThinkingConfig { thinking_budget }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiThinkingConfig {
    thinking_budget: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<Value>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    error: Option<GeminiApiError>,
}

impl GeminiResponse {
    /// Non-thought text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct GeminiApiError {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
}
