//! Cohere Embed (`cohere.embed-*`). Batches are sent as-is.

use crate::error::Result;
use crate::transcoder::EmbeddingTranscoder;
use crate::types::{Embedding, EmbeddingKind};
use crate::utils::json::{float_vector, required_array};
use serde_json::{Value, json};

pub const FAMILY: &str = "cohere.embed";

#[derive(Debug, Clone, Copy, Default)]
pub struct CohereEmbed;

impl EmbeddingTranscoder for CohereEmbed {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn build_body(&self, texts: &[String], kind: EmbeddingKind) -> Result<Value> {
        let input_type = match kind {
            EmbeddingKind::Document => "search_document",
            EmbeddingKind::Query => "search_query",
        };
        Ok(json!({ "texts": texts, "input_type": input_type }))
    }

    fn decode_embeddings(&self, body: &Value) -> Result<Vec<Embedding>> {
        required_array(body, "/embeddings", FAMILY)?
            .iter()
            .map(|v| float_vector(v, FAMILY))
            .collect()
    }
}
