//! Embedding invocation engine.

use crate::error::{FmError, Result};
use crate::execution::http::BedrockTransport;
use crate::transcoder::EmbeddingTranscoder;
use crate::types::{Embedding, EmbeddingKind};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// An embedding model bound to its family transcoder and a transport.
#[derive(Clone)]
pub struct EmbeddingModel<T> {
    model_id: String,
    transcoder: T,
    transport: Arc<dyn BedrockTransport>,
}

impl<T: EmbeddingTranscoder> std::fmt::Debug for EmbeddingModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingModel")
            .field("model_id", &self.model_id)
            .field("family", &self.transcoder.family())
            .finish_non_exhaustive()
    }
}

impl<T: EmbeddingTranscoder> EmbeddingModel<T> {
    pub fn new(
        model_id: impl Into<String>,
        transcoder: T,
        transport: Arc<dyn BedrockTransport>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            transcoder,
            transport,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn family(&self) -> &'static str {
        self.transcoder.family()
    }

    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// The exact body `embed` would send. Batch limits are checked here.
    pub fn prepare(&self, texts: &[String], kind: EmbeddingKind) -> Result<String> {
        self.transcoder.check_batch_size(texts.len())?;
        Ok(serde_json::to_string(&self.transcoder.build_body(texts, kind)?)?)
    }

    /// One vector per input text, in input order.
    pub async fn embed(&self, texts: &[String], kind: EmbeddingKind) -> Result<Vec<Embedding>> {
        let body = self.prepare(texts, kind)?;

        let started = Instant::now();
        let raw = self
            .transport
            .invoke(&self.model_id, Bytes::from(body))
            .await?;
        let latency = started.elapsed();

        let response: Value = serde_json::from_slice(&raw)?;
        let embeddings = self.transcoder.decode_embeddings(&response)?;
        if embeddings.len() != texts.len() {
            return Err(FmError::parse(format!(
                "{}: expected {} embeddings, got {}",
                self.transcoder.family(),
                texts.len(),
                embeddings.len()
            )));
        }
        tracing::debug!(
            target: "bedrock_fm::invoke",
            model_id = %self.model_id,
            family = self.transcoder.family(),
            inputs = texts.len(),
            latency_ms = latency.as_millis() as u64,
            "embedding invocation completed"
        );
        Ok(embeddings)
    }

    pub async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.embed(texts, EmbeddingKind::Document).await
    }

    pub async fn embed_query(&self, text: &str) -> Result<Embedding> {
        self.embed(&[text.to_string()], EmbeddingKind::Query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FmError::parse("embedding response was empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;
    use crate::utils::json::{float_vector, required_array};
    use serde_json::json;

    struct Single;

    impl EmbeddingTranscoder for Single {
        fn family(&self) -> &'static str {
            "test.embed"
        }

        fn max_batch_size(&self) -> Option<usize> {
            Some(1)
        }

        fn build_body(&self, texts: &[String], kind: EmbeddingKind) -> Result<Value> {
            Ok(json!({"texts": texts, "query": kind == EmbeddingKind::Query}))
        }

        fn decode_embeddings(&self, body: &Value) -> Result<Vec<Embedding>> {
            required_array(body, "/embeddings", "test embed")?
                .iter()
                .map(|v| float_vector(v, "test embed"))
                .collect()
        }
    }

    #[tokio::test]
    async fn embed_query_returns_single_vector() {
        let transport = Arc::new(MockTransport::responding(
            json!({"embeddings": [[0.5, -1.0]]}),
        ));
        let model = EmbeddingModel::new("test.embed-v1", Single, transport.clone());

        assert_eq!(model.embed_query("hi").await.unwrap(), vec![0.5, -1.0]);
        assert_eq!(
            transport.requests()[0].body,
            r#"{"texts":["hi"],"query":true}"#
        );
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected_locally() {
        let transport = Arc::new(MockTransport::responding(json!({"embeddings": []})));
        let model = EmbeddingModel::new("test.embed-v1", Single, transport.clone());

        let err = model
            .embed_documents(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        match err {
            FmError::UnsupportedBatchSize { family, size, max } => {
                assert_eq!(family, "test.embed");
                assert_eq!((size, max), (2, 1));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn count_mismatch_is_a_parse_error() {
        let transport = Arc::new(MockTransport::responding(json!({"embeddings": []})));
        let model = EmbeddingModel::new("test.embed-v1", Single, transport);
        assert!(matches!(
            model.embed_documents(&["a".to_string()]).await,
            Err(FmError::ParseError(_))
        ));
    }
}
