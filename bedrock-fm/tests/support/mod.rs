//! Shared helpers for integration tests.
//!
//! - `RecordingTransport`: in-memory transport that records every request
//! - fixture loading from `tests/fixtures`
//! - AWS event-stream frame encoding for wiremock bodies

#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use bedrock_fm::execution::http::ChunkStream;
use bedrock_fm::{BedrockTransport, FmError, Result};
use bytes::{BufMut, Bytes};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path:?}: {e}"))
}

pub fn json_fixture(name: &str) -> Value {
    serde_json::from_str(&read_fixture(name)).expect("fixture is valid JSON")
}

/// One chunk JSON object per non-empty line.
pub fn jsonl_fixture(name: &str) -> Vec<Value> {
    read_fixture(name)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("fixture line is valid JSON"))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub model_id: String,
    pub body: String,
    pub stream: bool,
}

/// Replays one canned response (or chunk list) and records every call.
#[derive(Default)]
pub struct RecordingTransport {
    response: Option<Value>,
    chunks: Vec<Value>,
    failure: Option<FmError>,
    requests: Mutex<Vec<Recorded>>,
}

impl RecordingTransport {
    pub fn responding(response: Value) -> Arc<Self> {
        Arc::new(Self {
            response: Some(response),
            ..Self::default()
        })
    }

    pub fn streaming(chunks: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            chunks,
            ..Self::default()
        })
    }

    pub fn failing(error: FmError) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(error),
            ..Self::default()
        })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Value {
        let requests = self.requests();
        let last = requests.last().expect("at least one request");
        serde_json::from_str(&last.body).expect("request body is JSON")
    }

    fn record(&self, model_id: &str, body: &Bytes, stream: bool) -> Result<()> {
        self.requests.lock().unwrap().push(Recorded {
            model_id: model_id.to_string(),
            body: String::from_utf8(body.to_vec()).expect("utf-8 body"),
            stream,
        });
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BedrockTransport for RecordingTransport {
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
            .map(|c| Ok(Bytes::from(serde_json::to_vec(c)?)))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

/// Encode one event-stream frame with string headers and valid checksums.
pub fn event_frame(headers: &[(&str, &str)], payload: &[u8]) -> Vec<u8> {
    let mut header_bytes = Vec::new();
    for (name, value) in headers {
        header_bytes.put_u8(name.len() as u8);
        header_bytes.put_slice(name.as_bytes());
        header_bytes.put_u8(7);
        header_bytes.put_u16(value.len() as u16);
        header_bytes.put_slice(value.as_bytes());
    }

    let total = 12 + header_bytes.len() + payload.len() + 4;
    let mut out = Vec::with_capacity(total);
    out.put_u32(total as u32);
    out.put_u32(header_bytes.len() as u32);
    let prelude_crc = crc32fast::hash(&out);
    out.put_u32(prelude_crc);
    out.put_slice(&header_bytes);
    out.put_slice(payload);
    let message_crc = crc32fast::hash(&out);
    out.put_u32(message_crc);
    out
}

/// A `chunk` event wrapping `json` the way the runtime does: `{"bytes": base64(json)}`.
pub fn chunk_frame(json: &Value) -> Vec<u8> {
    let encoded = base64::engine::general_purpose::STANDARD.encode(json.to_string());
    let payload = serde_json::json!({ "bytes": encoded }).to_string();
    event_frame(
        &[
            (":event-type", "chunk"),
            (":content-type", "application/json"),
            (":message-type", "event"),
        ],
        payload.as_bytes(),
    )
}

pub fn exception_frame(exception_type: &str, message: &str) -> Vec<u8> {
    let payload = serde_json::json!({ "message": message }).to_string();
    event_frame(
        &[
            (":exception-type", exception_type),
            (":content-type", "application/json"),
            (":message-type", "exception"),
        ],
        payload.as_bytes(),
    )
}

/// Concatenate chunk frames for every value.
pub fn event_stream_body(chunks: &[Value]) -> Vec<u8> {
    chunks.iter().flat_map(chunk_frame).collect()
}
