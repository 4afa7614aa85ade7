//! Jamba (`ai21.jamba-*`): OpenAI-style chat completions.
//!
//! `top_p` is not part of the fixed body; pass it through `extra_args` when
//! needed.

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder};
use crate::types::{Role, Turn};
use crate::utils::json::{required, required_array};
use serde_json::{Map, Value, json};

pub const FAMILY: &str = "ai21.jamba";

const SUPPORTED_EXTRA_ARGS: &[&str] = &[
    "n",
    "top_p",
    "frequency_penalty",
    "presence_penalty",
    "response_format",
    "documents",
    "tools",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Jamba;

impl TextTranscoder for Jamba {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        SUPPORTED_EXTRA_ARGS
    }

    fn text_prompt(&self, prompt: &str) -> Result<RenderedPrompt> {
        Ok(RenderedPrompt::Messages {
            system: None,
            messages: vec![json!({"role": "user", "content": prompt})],
        })
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
        stream: bool,
    ) -> Result<Value> {
        let RenderedPrompt::Messages { messages, .. } = prompt else {
            return Err(FmError::InvalidInput(format!(
                "{FAMILY} expects a message list"
            )));
        };
        let mut body: Map<String, Value> = params.extra_args.clone();
        body.insert("messages".into(), Value::Array(messages.clone()));
        body.insert("max_tokens".into(), params.max_token_count.into());
        body.insert("stop".into(), params.stop_sequences.clone().into());
        body.insert("temperature".into(), params.temperature_value());
        body.insert("stream".into(), stream.into());
        Ok(Value::Object(body))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        required_array(body, "/choices", FAMILY)?
            .iter()
            .map(|choice| {
                let content = required(choice, "/message/content", FAMILY)?;
                Ok(content.as_str().unwrap_or_default().to_string())
            })
            .collect()
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        let content = chunk
            .pointer("/choices/0/delta/content")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !content.is_empty() {
            return Ok(Chunk::Text(content.to_string()));
        }
        let finished = chunk
            .pointer("/choices/0/finish_reason")
            .is_some_and(|reason| !reason.is_null());
        Ok(if finished { Chunk::Finished } else { Chunk::Empty })
    }
}
