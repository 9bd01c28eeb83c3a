//! HTTP transport with shared request and error handling

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use reqwest_eventsource::retry::Never;
use reqwest_eventsource::{Event, EventSource};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::infrastructure::model::transport::{JsonStream, Transport, TransportRequest};
use crate::infrastructure::model::types::DocError;

/// reqwest-backed [`Transport`].
#[derive(Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { http: client }
    }

    /// Build a transport whose requests (including streamed bodies) are
    /// bounded by `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?))
    }

    fn build(&self, request: &TransportRequest) -> RequestBuilder {
        request
            .headers
            .iter()
            .fold(self.http.post(&request.url).json(&request.body), |builder, (name, value)| {
                builder.header(name.as_str(), value.as_str())
            })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<Value, DocError> {
        let provider = request.provider.as_str();
        let response = self
            .build(&request)
            .send()
            .await
            .map_err(|err| DocError::network(provider, err))?;

        if !response.status().is_success() {
            return Err(status_error(provider, response).await);
        }

        response.json().await.map_err(|err| {
            if err.is_decode() {
                DocError::invalid_response(provider, err.to_string())
            } else {
                DocError::network(provider, err)
            }
        })
    }

    async fn post_stream(&self, request: TransportRequest) -> Result<JsonStream, DocError> {
        let mut source = EventSource::new(self.build(&request))
            .map_err(|err| DocError::invalid_request(&request.provider, err.to_string()))?;
        source.set_retry_policy(Box::new(Never));

        let provider = request.provider;
        let events = futures::stream::unfold(Some(source), move |state| {
            let provider = provider.clone();
            async move {
                let mut source = state?;
                loop {
                    match source.next().await {
                        Some(Ok(Event::Open)) => {
                            debug!(provider = provider.as_str(), "Event stream opened");
                        }
                        Some(Ok(Event::Message(message))) => {
                            let item = serde_json::from_str::<Value>(&message.data).map_err(|err| {
                                DocError::invalid_response(
                                    provider.as_str(),
                                    format!("malformed stream event: {err}"),
                                )
                            });
                            return Some((item, Some(source)));
                        }
                        Some(Err(reqwest_eventsource::Error::StreamEnded)) | None => {
                            source.close();
                            debug!(provider = provider.as_str(), "Event stream ended");
                            return None;
                        }
                        Some(Err(err)) => {
                            source.close();
                            let err = stream_error(&provider, err).await;
                            return Some((Err(err), None));
                        }
                    }
                }
            }
        });

        Ok(events.boxed())
    }
}

async fn stream_error(provider: &str, err: reqwest_eventsource::Error) -> DocError {
    match err {
        reqwest_eventsource::Error::InvalidStatusCode(_, response) => {
            status_error(provider, response).await
        }
        reqwest_eventsource::Error::Transport(source) => DocError::network(provider, source),
        other => DocError::invalid_response(provider, other.to_string()),
    }
}

async fn status_error(provider: &str, response: Response) -> DocError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    DocError::status(provider, status, error_message(&body, status))
}

/// Pull `error.message` out of a provider error body, falling back to the raw
/// body and then the status reason.
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
