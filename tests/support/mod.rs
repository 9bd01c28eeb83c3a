// Shared test support: a scripted transport that records every call.

#![allow(dead_code)]

use async_trait::async_trait;
use celeste_docintel_core::{
    DocError, Document, JsonStream, MimeType, ProviderSettings, Settings, Transport,
    TransportRequest,
};
use futures::StreamExt;
use futures::stream;
use serde_json::{Value, json};
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

/// Transport returning canned JSON bodies and event streams.
#[derive(Default)]
pub struct ScriptedTransport {
    response: Value,
    events: Vec<Value>,
    stream_error: Option<String>,
    failure: Option<(u16, String)>,
    calls: AtomicUsize,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    pub fn with_events(mut self, events: Vec<Value>) -> Self {
        self.events = events;
        self
    }

    /// Emit an error item after the scripted events.
    pub fn with_stream_error(mut self, reason: impl Into<String>) -> Self {
        self.stream_error = Some(reason.into());
        self
    }

    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            failure: Some((status, message.into())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn record(&self, request: TransportRequest) -> Result<(), DocError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("requests lock").push(request);
        match &self.failure {
            Some((status, message)) => Err(DocError::Status {
                provider: "google".to_string(),
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<Value, DocError> {
        self.record(request)?;
        Ok(self.response.clone())
    }

    async fn post_stream(&self, request: TransportRequest) -> Result<JsonStream, DocError> {
        self.record(request)?;
        let mut items: Vec<Result<Value, DocError>> =
            self.events.iter().cloned().map(Ok).collect();
        if let Some(reason) = &self.stream_error {
            items.push(Err(DocError::invalid_response("google", reason.clone())));
        }
        Ok(stream::iter(items).boxed())
    }
}

/// A Gemini response (or stream event) carrying one text part.
pub fn text_chunk(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] }
        }]
    })
}

/// A Gemini event carrying only usage metadata.
pub fn usage_event(input: u32, output: u32, total: u32) -> Value {
    json!({
        "usageMetadata": {
            "promptTokenCount": input,
            "candidatesTokenCount": output,
            "totalTokenCount": total
        }
    })
}

/// A complete non-streamed Gemini response.
pub fn full_response(text: &str, input: u32, output: u32, total: u32) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": input,
            "candidatesTokenCount": output,
            "totalTokenCount": total
        },
        "modelVersion": "gemini-2.5-flash-lite-preview-06-17"
    })
}

pub fn settings_with_key(key: &str) -> Settings {
    Settings::default().with_provider(
        celeste_docintel_core::Provider::Google,
        ProviderSettings::google().with_api_key(key),
    )
}

/// Temporary file with the given extension and contents, wrapped as a document.
pub fn temp_document(contents: &[u8], extension: &str, mime: MimeType) -> (NamedTempFile, Document) {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("temp file");
    file.write_all(contents).expect("write temp file");
    let document = Document::new(file.path(), mime);
    (file, document)
}
