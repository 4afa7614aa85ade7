//! Titan text (`amazon.titan-text-*`).
//!
//! Completion-style body with a nested `textGenerationConfig`. No extra
//! arguments are accepted.

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder};
use crate::types::Turn;
use crate::utils::json::{required_str, strings_at};
use serde_json::{Value, json};

pub const FAMILY: &str = "amazon.titan";

#[derive(Debug, Clone, Copy, Default)]
pub struct Titan;

impl TextTranscoder for Titan {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        Ok(RenderedPrompt::Text(templates::transcript(
            conversation,
            "User",
            "Bot",
        )))
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let input = prompt
            .as_text()
            .ok_or_else(|| FmError::InvalidInput(format!("{FAMILY} expects a text prompt")))?;
        Ok(json!({
            "inputText": input,
            "textGenerationConfig": {
                "maxTokenCount": params.max_token_count,
                "stopSequences": params.stop_sequences,
                "temperature": params.temperature_value(),
                "topP": params.top_p_value(),
            }
        }))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        strings_at(body, "/results", "/outputText", FAMILY)
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        let text = required_str(chunk, "/outputText", FAMILY)?;
        Ok(if text.is_empty() {
            Chunk::Empty
        } else {
            Chunk::Text(text.to_string())
        })
    }
}
