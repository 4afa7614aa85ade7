//! `InvokeModel` / `InvokeModelWithResponseStream` over HTTP.

use super::errors::{chunk_payload, classify_bedrock_http_error};
use crate::config::BedrockConfig;
use crate::defaults;
use crate::error::{FmError, Result};
use crate::streaming::EventStreamDecoder;
use crate::utils::url::{join_url, model_action_path};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::pin::Pin;
use std::sync::Arc;

/// Stream of decoded chunk payloads (the JSON each model family emits per event).
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// The two runtime operations every engine is built on.
///
/// Implementations own authentication and connection handling. Engines only
/// hand over a model id and a serialized JSON body.
#[async_trait]
pub trait BedrockTransport: Send + Sync {
    /// Invoke synchronously and return the raw response body.
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes>;

    /// Invoke with a streamed response. Dropping the stream releases the connection.
    async fn invoke_streaming(&self, model_id: &str, body: Bytes) -> Result<ChunkStream>;
}

#[async_trait]
impl<T: BedrockTransport + ?Sized> BedrockTransport for Arc<T> {
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes> {
        (**self).invoke(model_id, body).await
    }

    async fn invoke_streaming(&self, model_id: &str, body: Bytes) -> Result<ChunkStream> {
        (**self).invoke_streaming(model_id, body).await
    }
}

/// reqwest-backed transport against the Bedrock runtime REST API.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &BedrockConfig) -> Result<Self> {
        let client = config.build_http_client()?;
        Self::with_client(client, config)
    }

    /// Reuse an existing client (connection pool, proxy settings, ...).
    pub fn with_client(client: reqwest::Client, config: &BedrockConfig) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.base_url(),
            headers: config.default_headers()?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&BedrockConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, model_id: &str, action: &str) -> String {
        join_url(&self.base_url, &model_action_path(model_id, action))
    }

    async fn post(&self, url: &str, body: Bytes, accept: &'static str) -> Result<reqwest::Response> {
        tracing::debug!(target: "bedrock_fm::http", %url, bytes = body.len(), "POST");

        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .header(ACCEPT, HeaderValue::from_static(accept))
            .body(body)
            .send()
            .await
            .map_err(|e| FmError::HttpError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = classify_bedrock_http_error(status.as_u16(), &text);
        tracing::debug!(target: "bedrock_fm::http", %url, status = status.as_u16(), error = %err, "request failed");
        Err(err)
    }
}

#[async_trait]
impl BedrockTransport for HttpTransport {
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes> {
        let url = self.url(model_id, "invoke");
        let response = self.post(&url, body, "application/json").await?;
        response
            .bytes()
            .await
            .map_err(|e| FmError::HttpError(e.to_string()))
    }

    async fn invoke_streaming(&self, model_id: &str, body: Bytes) -> Result<ChunkStream> {
        let url = self.url(model_id, "invoke-with-response-stream");
        let response = self
            .post(&url, body, defaults::http::EVENT_STREAM_CONTENT_TYPE)
            .await?;

        let mut bytes = Box::pin(response.bytes_stream());
        let stream = async_stream::stream! {
            let mut decoder = EventStreamDecoder::new();
            while let Some(piece) = bytes.next().await {
                match piece {
                    Ok(piece) => decoder.push(&piece),
                    Err(e) => {
                        yield Err(FmError::StreamError(e.to_string()));
                        return;
                    }
                }
                loop {
                    let message = match decoder.next_message() {
                        Ok(Some(message)) => message,
                        Ok(None) => break,
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    };
                    match chunk_payload(&message) {
                        Ok(Some(payload)) => yield Ok(payload),
                        Ok(None) => {}
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    }
                }
            }
            if decoder.pending() > 0 {
                yield Err(FmError::StreamError(format!(
                    "event stream ended with {} undecoded bytes",
                    decoder.pending()
                )));
            }
        };
        Ok(Box::pin(stream))
    }
}
