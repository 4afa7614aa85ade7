//! Claude 3+ Messages API (`anthropic.claude-3-*` and later).
//!
//! The System turn is hoisted into the top-level `system` field. Human turns
//! with images become content-block arrays with base64 PNG sources.

use super::SUPPORTED_EXTRA_ARGS;
use crate::defaults::anthropic::VERSION;
use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder};
use crate::types::{Role, Turn};
use crate::utils::json::{required_array, required_str};
use serde_json::{Map, Value, json};

pub const FAMILY: &str = "anthropic.claude-3";

#[derive(Debug, Clone, Copy, Default)]
pub struct Claude3;

fn message(turn: &Turn) -> Value {
    let role = match turn.role {
        Role::Assistant => "assistant",
        _ => "user",
    };
    if turn.images.is_empty() {
        return json!({"role": role, "content": turn.content});
    }
    let mut blocks = vec![json!({"type": "text", "text": turn.content})];
    blocks.extend(turn.images.iter().map(|image| {
        json!({
            "type": "image",
            "source": {
                "type": "base64",
                "data": image.to_base64(),
                "media_type": "image/png",
            }
        })
    }));
    json!({"role": role, "content": blocks})
}

impl TextTranscoder for Claude3 {
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
        let (system, turns) = templates::split_system(conversation);
        Ok(RenderedPrompt::Messages {
            system: system.map(str::to_string),
            messages: turns.iter().map(message).collect(),
        })
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let RenderedPrompt::Messages { system, messages } = prompt else {
            return Err(FmError::InvalidInput(format!(
                "{FAMILY} expects a message list"
            )));
        };

        let mut body: Map<String, Value> = params.extra_args.clone();
        if let Some(system) = system {
            body.insert("system".into(), system.as_str().into());
        }
        body.insert("messages".into(), Value::Array(messages.clone()));
        body.insert("max_tokens".into(), params.max_token_count.into());
        body.insert("stop_sequences".into(), params.stop_sequences.clone().into());
        body.insert("temperature".into(), params.temperature_value());
        body.insert("top_p".into(), params.top_p_value());
        body.insert("anthropic_version".into(), VERSION.into());
        Ok(Value::Object(body))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        let text: String = required_array(body, "/content", FAMILY)?
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();
        Ok(vec![text])
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        match chunk.get("type").and_then(Value::as_str) {
            Some("content_block_delta") => {
                let text = chunk
                    .pointer("/delta/text")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                Ok(if text.is_empty() {
                    Chunk::Empty
                } else {
                    Chunk::Text(text.to_string())
                })
            }
            Some("message_stop") => Ok(Chunk::Finished),
            Some("error") => Err(FmError::StreamError(
                required_str(chunk, "/error/message", FAMILY)
                    .unwrap_or("stream error")
                    .to_string(),
            )),
            other => {
                tracing::trace!(target: "bedrock_fm::stream", family = FAMILY, event = ?other, "skipping chunk");
                Ok(Chunk::Empty)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::testing::{chat_body, fixture_params, generate_body};
    use crate::types::{GenerationParams, Image};

    #[test]
    fn text_prompt_becomes_single_user_message() {
        assert_eq!(
            generate_body(&Claude3, "A", &fixture_params()).unwrap(),
            r#"{"messages":[{"role":"user","content":"A"}],"max_tokens":500,"stop_sequences":[],"temperature":0.5,"top_p":1,"anthropic_version":"bedrock-2023-05-31"}"#
        );
    }

    #[test]
    fn stop_sequences_pass_through_unchanged() {
        let params = fixture_params().with_stop_sequences(["Hello"]);
        assert_eq!(
            generate_body(&Claude3, "A", &params).unwrap(),
            r#"{"messages":[{"role":"user","content":"A"}],"max_tokens":500,"stop_sequences":["Hello"],"temperature":0.5,"top_p":1,"anthropic_version":"bedrock-2023-05-31"}"#
        );
    }

    #[test]
    fn top_k_and_defaults() {
        let params = fixture_params().with_extra_arg("top_k", 200);
        assert_eq!(
            generate_body(&Claude3, "A", &params).unwrap(),
            r#"{"top_k":200,"messages":[{"role":"user","content":"A"}],"max_tokens":500,"stop_sequences":[],"temperature":0.5,"top_p":1,"anthropic_version":"bedrock-2023-05-31"}"#
        );
        assert_eq!(
            generate_body(&Claude3, "test", &GenerationParams::default()).unwrap(),
            r#"{"messages":[{"role":"user","content":"test"}],"max_tokens":500,"stop_sequences":[],"temperature":0.7,"top_p":1,"anthropic_version":"bedrock-2023-05-31"}"#
        );
    }

    #[test]
    fn system_is_hoisted_after_extra_args() {
        let conv = [
            Turn::system("hello"),
            Turn::human("bye"),
            Turn::assistant("Ok"),
            Turn::human("Nice"),
        ];
        let params = fixture_params().with_extra_arg("top_k", 5);
        assert_eq!(
            chat_body(&Claude3, &conv, &params, false).unwrap(),
            r#"{"top_k":5,"system":"hello","messages":[{"role":"user","content":"bye"},{"role":"assistant","content":"Ok"},{"role":"user","content":"Nice"}],"max_tokens":500,"stop_sequences":[],"temperature":0.5,"top_p":1,"anthropic_version":"bedrock-2023-05-31"}"#
        );
    }

    #[test]
    fn images_become_content_blocks() {
        let image = Image::blank(1, 1).unwrap();
        let conv = [Turn::human("what is this").with_image(image.clone())];
        let RenderedPrompt::Messages { messages, .. } = Claude3.render_prompt(&conv).unwrap() else {
            panic!("expected messages");
        };
        assert_eq!(
            messages[0],
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "what is this"},
                    {"type": "image", "source": {"type": "base64", "data": image.to_base64(), "media_type": "image/png"}}
                ]
            })
        );
    }

    #[test]
    fn decodes_messages_and_stream_events() {
        let body = json!({"type": "message", "content": [{"type": "text", "text": "My name is Claude."}]});
        assert_eq!(Claude3.decode_response(&body).unwrap(), vec!["My name is Claude."]);

        assert_eq!(
            Claude3.decode_chunk(&json!({"type": "message_start", "message": {}})).unwrap(),
            Chunk::Empty
        );
        assert_eq!(
            Claude3
                .decode_chunk(&json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "Hi"}}))
                .unwrap(),
            Chunk::Text("Hi".into())
        );
        assert_eq!(
            Claude3.decode_chunk(&json!({"type": "message_stop"})).unwrap(),
            Chunk::Finished
        );
    }
}
