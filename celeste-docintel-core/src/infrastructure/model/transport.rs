//! Transport seam between provider clients and the network.
//!
//! Clients build provider-specific JSON bodies and hand them to a
//! [`Transport`]; the HTTP implementation lives in
//! [`clients::HttpTransport`](super::clients::HttpTransport). Tests swap in
//! scripted transports.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use super::types::DocError;

/// Stream of decoded JSON events.
pub type JsonStream = BoxStream<'static, Result<Value, DocError>>;

/// A JSON POST addressed to a provider endpoint.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Provider id, used for error attribution and logging
    pub provider: String,
    pub url: String,
    /// Extra headers such as credentials. Never logged.
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl TransportRequest {
    pub fn new(provider: impl Into<String>, url: impl Into<String>, body: Value) -> Self {
        Self {
            provider: provider.into(),
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and decode a single JSON body.
    async fn post_json(&self, request: TransportRequest) -> Result<Value, DocError>;

    /// Send the request and decode each server-sent event as JSON.
    ///
    /// The stream ends when the server closes it; it never reconnects.
    async fn post_stream(&self, request: TransportRequest) -> Result<JsonStream, DocError>;
}
