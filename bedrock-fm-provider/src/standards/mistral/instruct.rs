//! Mistral 7B / Mixtral 8x7B instruct (`mistral.mistral-*`, `mistral.mixtral-*`).
//!
//! Prompts use the `[INST]` format; chat reuses the Llama 2 turn layout.

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::Turn;
use crate::utils::json::strings_at;
use serde_json::{Value, json};

pub const FAMILY: &str = "mistral.mistral";
pub const MIXTRAL_FAMILY: &str = "mistral.mixtral";

/// One transcoder serves both tags; the registry records which one matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mistral {
    mixtral: bool,
}

impl Mistral {
    pub const fn mistral() -> Self {
        Self { mixtral: false }
    }

    pub const fn mixtral() -> Self {
        Self { mixtral: true }
    }
}

impl TextTranscoder for Mistral {
    fn family(&self) -> &'static str {
        if self.mixtral { MIXTRAL_FAMILY } else { FAMILY }
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        &["top_k"]
    }

    fn text_prompt(&self, prompt: &str) -> Result<RenderedPrompt> {
        Ok(RenderedPrompt::Text(templates::inst_wrap(prompt)))
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(self.family(), conversation)?;
        Ok(RenderedPrompt::Text(templates::inst_wrap(
            &templates::inst_chat(conversation),
        )))
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let prompt = prompt.as_text().ok_or_else(|| {
            FmError::InvalidInput(format!("{} expects a text prompt", self.family()))
        })?;
        Ok(spread_body(
            &params.extra_args,
            json!({
                "prompt": prompt,
                "max_tokens": params.max_token_count,
                "temperature": params.temperature_value(),
                "top_p": params.top_p_value(),
                "stop": params.stop_sequences,
            }),
        ))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        strings_at(body, "/outputs", "/text", self.family())
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        let text = chunk
            .pointer("/outputs/0/text")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(if text.is_empty() {
            Chunk::Empty
        } else {
            Chunk::Text(text.to_string())
        })
    }
}
