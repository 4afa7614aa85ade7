//! Transcoder contracts.
//!
//! A transcoder is the stateless policy object that converts between the uniform
//! parameter model and one family's wire schema. The engines in
//! [`crate::execution`] own the control flow; transcoders only shape and decode
//! payloads.

use crate::error::{FmError, Result};
use crate::params::{EffectiveParams, FamilyDefaults};
use crate::types::{Embedding, EmbeddingKind, ExtraArgs, Image, ImageRequest, Turn};
use serde_json::{Map, Value};

/// A prompt after family-specific templating.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedPrompt {
    /// Flattened, role-annotated completion prompt.
    Text(String),
    /// Structured turn list. `system` is set when the family hoists the System
    /// turn out of the list instead of keeping it as a message.
    Messages {
        system: Option<String>,
        messages: Vec<Value>,
    },
}

impl RenderedPrompt {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Messages { .. } => None,
        }
    }
}

/// One decoded stream chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// A text fragment to hand to the caller.
    Text(String),
    /// Bookkeeping chunk with no text (message start, usage, ...).
    Empty,
    /// Terminal marker; the stream ends without emitting anything for it.
    Finished,
}

/// Text model family.
pub trait TextTranscoder: Send + Sync {
    /// Stable family tag, e.g. `anthropic.claude-3`.
    fn family(&self) -> &'static str;

    /// Whitelist of accepted `extra_args` keys. Empty means none are accepted.
    fn supported_extra_args(&self) -> &'static [&'static str] {
        &[]
    }

    fn validate_extra_args(&self, args: &ExtraArgs) -> Result<()> {
        let supported = self.supported_extra_args();
        let offending: Vec<&str> = args
            .keys()
            .map(String::as_str)
            .filter(|k| !supported.contains(k))
            .collect();
        if offending.is_empty() {
            Ok(())
        } else {
            Err(FmError::unsupported_argument(self.family(), offending))
        }
    }

    /// Whether the single-prompt `generate` entry point is available.
    fn supports_generate(&self) -> bool {
        true
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    fn family_defaults(&self) -> FamilyDefaults {
        FamilyDefaults::default()
    }

    /// Prompt used by `generate`.
    fn text_prompt(&self, prompt: &str) -> Result<RenderedPrompt> {
        Ok(RenderedPrompt::Text(prompt.to_string()))
    }

    /// Prompt used by `chat`. The conversation has already been validated.
    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt>;

    /// Wire body: `extra_args` first, then the family's fixed fields.
    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        stream: bool,
    ) -> Result<Value>;

    fn decode_response(&self, body: &Value) -> Result<Vec<String>>;

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk>;
}

/// Image model family.
pub trait ImageTranscoder: Send + Sync {
    fn family(&self) -> &'static str;

    fn build_body(&self, request: &ImageRequest) -> Result<Value>;

    fn decode_images(&self, body: &Value) -> Result<Vec<Image>>;
}

/// Embedding model family.
pub trait EmbeddingTranscoder: Send + Sync {
    fn family(&self) -> &'static str;

    /// Largest accepted batch, `None` for no local limit.
    fn max_batch_size(&self) -> Option<usize> {
        None
    }

    fn check_batch_size(&self, size: usize) -> Result<()> {
        match self.max_batch_size() {
            Some(max) if size > max || size == 0 => Err(FmError::UnsupportedBatchSize {
                family: self.family().to_string(),
                size,
                max,
            }),
            _ => Ok(()),
        }
    }

    fn build_body(&self, texts: &[String], kind: EmbeddingKind) -> Result<Value>;

    fn decode_embeddings(&self, body: &Value) -> Result<Vec<Embedding>>;
}

/// Spread `extra_args`, then insert `fixed` fields so they win on key collision.
///
/// A colliding key keeps the position it had in `extra_args`.
pub fn spread_body(extra_args: &ExtraArgs, fixed: Value) -> Value {
    let mut body: Map<String, Value> = extra_args.clone();
    if let Value::Object(fields) = fixed {
        for (key, value) in fields {
            body.insert(key, value);
        }
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Whitelisted;

    impl TextTranscoder for Whitelisted {
        fn family(&self) -> &'static str {
            "test.family"
        }

        fn supported_extra_args(&self) -> &'static [&'static str] {
            &["top_k"]
        }

        fn render_prompt(&self, _conversation: &[Turn]) -> Result<RenderedPrompt> {
            Ok(RenderedPrompt::Text(String::new()))
        }

        fn build_body(
            &self,
            _prompt: &RenderedPrompt,
            _params: &EffectiveParams,
            _stream: bool,
        ) -> Result<Value> {
            Ok(Value::Null)
        }

        fn decode_response(&self, _body: &Value) -> Result<Vec<String>> {
            Ok(Vec::new())
        }

        fn decode_chunk(&self, _chunk: &Value) -> Result<Chunk> {
            Ok(Chunk::Empty)
        }
    }

    #[test]
    fn whitelist_reports_every_offending_key() {
        let mut args = ExtraArgs::new();
        args.insert("top_k".into(), json!(1));
        args.insert("top".into(), json!(1));
        args.insert("foo".into(), json!(1));
        match Whitelisted.validate_extra_args(&args).unwrap_err() {
            FmError::UnsupportedArgument { family, arguments } => {
                assert_eq!(family, "test.family");
                assert_eq!(arguments, vec!["top".to_string(), "foo".to_string()]);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn spread_body_puts_extra_args_first_and_fixed_fields_win() {
        let mut args = ExtraArgs::new();
        args.insert("n".into(), json!(1));
        args.insert("stream".into(), json!(true));
        let body = spread_body(&args, json!({"messages": [], "stream": false}));
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"n":1,"stream":false,"messages":[]}"#
        );
    }
}
