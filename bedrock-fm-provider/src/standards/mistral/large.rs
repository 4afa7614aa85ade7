//! Mistral Large (`mistral.mistral-large-*`). Chat only, messages API.

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder};
use crate::types::{Role, Turn};
use crate::utils::json::required_array;
use serde_json::{Map, Value, json};

pub const FAMILY: &str = "mistral.mistral-large";

#[derive(Debug, Clone, Copy, Default)]
pub struct MistralLarge;

fn choice_text(choice: &Value) -> &str {
    choice
        .pointer("/message/content")
        .or_else(|| choice.pointer("/delta/content"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

impl TextTranscoder for MistralLarge {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        &["tools", "tool_choice"]
    }

    fn supports_generate(&self) -> bool {
        false
    }

    fn text_prompt(&self, _prompt: &str) -> Result<RenderedPrompt> {
        Err(FmError::not_supported(FAMILY, "generate"))
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        let messages = conversation
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::System => "system",
                    Role::Human => "user",
                    Role::Assistant => "assistant",
                };
                json!({"role": role, "content": turn.content})
            })
            .collect();
        Ok(RenderedPrompt::Messages {
            system: None,
            messages,
        })
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let RenderedPrompt::Messages { messages, .. } = prompt else {
            return Err(FmError::not_supported(FAMILY, "generate"));
        };
        let mut body: Map<String, Value> = params.extra_args.clone();
        body.insert("messages".into(), Value::Array(messages.clone()));
        body.insert("max_tokens".into(), params.max_token_count.into());
        body.insert("temperature".into(), params.temperature_value());
        body.insert("top_p".into(), params.top_p_value());
        Ok(Value::Object(body))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        Ok(required_array(body, "/choices", FAMILY)?
            .iter()
            .map(|choice| choice_text(choice).to_string())
            .collect())
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        let text = chunk.pointer("/choices/0").map(choice_text).unwrap_or_default();
        Ok(if text.is_empty() {
            Chunk::Empty
        } else {
            Chunk::Text(text.to_string())
        })
    }
}
