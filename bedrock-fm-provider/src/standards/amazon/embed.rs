//! Titan embeddings (`amazon.titan-embed-*`). One input text per request.

use crate::error::Result;
use crate::transcoder::EmbeddingTranscoder;
use crate::types::{Embedding, EmbeddingKind};
use crate::utils::json::{float_vector, required};
use serde_json::{Value, json};

pub const FAMILY: &str = "amazon.titan-embed";

#[derive(Debug, Clone, Copy, Default)]
pub struct TitanEmbed;

impl EmbeddingTranscoder for TitanEmbed {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn max_batch_size(&self) -> Option<usize> {
        Some(1)
    }

    fn build_body(&self, texts: &[String], _kind: EmbeddingKind) -> Result<Value> {
        self.check_batch_size(texts.len())?;
        Ok(json!({ "inputText": texts[0] }))
    }

    fn decode_embeddings(&self, body: &Value) -> Result<Vec<Embedding>> {
        Ok(vec![float_vector(required(body, "/embedding", FAMILY)?, FAMILY)?])
    }
}
