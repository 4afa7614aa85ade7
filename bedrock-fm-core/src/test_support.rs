//! Test support helpers (crate-internal).
//!
//! Process-global concerns (environment variable mutation) and an in-memory
//! transport that records every request and replays canned responses.

#![allow(unsafe_code)]

use crate::error::{FmError, Result};
use crate::execution::http::{BedrockTransport, ChunkStream};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::sync::Mutex;

pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

pub(crate) struct EnvGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub model_id: String,
    pub body: String,
    pub stream: bool,
}

/// Transport double: one JSON response for `invoke`, a chunk list for streaming.
#[derive(Default)]
pub(crate) struct MockTransport {
    response: Option<Value>,
    chunks: Vec<Value>,
    failure: Option<FmError>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub(crate) fn responding(response: Value) -> Self {
        Self {
            response: Some(response),
            ..Self::default()
        }
    }

    pub(crate) fn streaming(chunks: Vec<Value>) -> Self {
        Self {
            chunks,
            ..Self::default()
        }
    }

    pub(crate) fn failing(error: FmError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, model_id: &str, body: &Bytes, stream: bool) -> Result<()> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                model_id: model_id.to_string(),
                body: String::from_utf8_lossy(body).into_owned(),
                stream,
            });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BedrockTransport for MockTransport {
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes> {
        self.record(model_id, &body, false)?;
        let response = self.response.clone().unwrap_or(Value::Null);
        Ok(Bytes::from(serde_json::to_vec(&response)?))
    }

    async fn invoke_streaming(&self, model_id: &str, body: Bytes) -> Result<ChunkStream> {
        self.record(model_id, &body, true)?;
        let chunks: Vec<Result<Bytes>> = self
            .chunks
            .iter()
            .map(|c| Ok(Bytes::from(c.to_string())))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}
