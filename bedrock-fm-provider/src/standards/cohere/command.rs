//! Command (`cohere.command-text-*`, `cohere.command-light-*`).

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::Turn;
use crate::utils::json::strings_at;
use serde_json::{Value, json};

pub const FAMILY: &str = "cohere.command";

/// Streamed in place of a paragraph break.
const EOS_TOKEN: &str = "<EOS_TOKEN>";

#[derive(Debug, Clone, Copy, Default)]
pub struct Command;

impl TextTranscoder for Command {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        &["return_likelihoods", "num_generations", "k"]
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        Ok(RenderedPrompt::Text(templates::transcript(
            conversation,
            "User",
            "Chatbot",
        )))
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        stream: bool,
    ) -> Result<Value> {
        let prompt = prompt
            .as_text()
            .ok_or_else(|| FmError::InvalidInput(format!("{FAMILY} expects a text prompt")))?;
        Ok(spread_body(
            &params.extra_args,
            json!({
                "prompt": prompt,
                "max_tokens": params.max_token_count,
                "temperature": params.temperature_value(),
                "p": params.top_p_value(),
                "stop_sequences": params.stop_sequences,
                "stream": stream,
            }),
        ))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        strings_at(body, "/generations", "/text", FAMILY)
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        if chunk.get("is_finished").and_then(Value::as_bool) == Some(true) {
            return Ok(Chunk::Finished);
        }
        Ok(match chunk.get("text").and_then(Value::as_str) {
            Some(EOS_TOKEN) => Chunk::Text("\n".to_string()),
            Some(text) if !text.is_empty() => Chunk::Text(text.to_string()),
            _ => Chunk::Empty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::testing::{fixture_params, generate_body};

    #[test]
    fn completion_body() {
        assert_eq!(
            generate_body(&Command, "A", &fixture_params()).unwrap(),
            r#"{"prompt":"A","max_tokens":500,"temperature":0.5,"p":1,"stop_sequences":[],"stream":false}"#
        );
    }

    #[test]
    fn k_is_spread_first() {
        let params = fixture_params().with_extra_arg("k", 1);
        assert_eq!(
            generate_body(&Command, "A", &params).unwrap(),
            r#"{"k":1,"prompt":"A","max_tokens":500,"temperature":0.5,"p":1,"stop_sequences":[],"stream":false}"#
        );
    }

    #[test]
    fn decodes_multiple_generations() {
        let body = json!({"generations": [{"text": "a"}, {"text": "b"}, {"text": "c"}]});
        assert_eq!(Command.decode_response(&body).unwrap().len(), 3);
    }

    #[test]
    fn eos_token_becomes_newline_and_finish_ends() {
        assert_eq!(
            Command.decode_chunk(&json!({"text": "<EOS_TOKEN>", "is_finished": false})).unwrap(),
            Chunk::Text("\n".into())
        );
        assert_eq!(
            Command.decode_chunk(&json!({"text": "Hi", "is_finished": false})).unwrap(),
            Chunk::Text("Hi".into())
        );
        assert_eq!(
            Command
                .decode_chunk(&json!({"is_finished": true, "finish_reason": "COMPLETE"}))
                .unwrap(),
            Chunk::Finished
        );
    }
}
