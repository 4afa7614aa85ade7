//! Command R / R+ (`cohere.command-r-*`). Chat only.
//!
//! The last Human turn becomes `message`, earlier turns `chat_history`. A
//! System turn is sent as `preamble` unless the caller passes one explicitly.

use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder};
use crate::types::{Role, Turn};
use crate::utils::json::required_str;
use serde_json::{Map, Value, json};

pub const FAMILY: &str = "cohere.command-r";

const SUPPORTED_EXTRA_ARGS: &[&str] = &[
    "k",
    "documents",
    "search_queries_only",
    "preamble",
    "prompt_truncation",
    "frequency_penalty",
    "presence_penalty",
    "seed",
    "return_prompt",
    "tools",
    "tool_results",
    "stop_sequences",
    "raw_prompting",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct CommandR;

impl TextTranscoder for CommandR {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        SUPPORTED_EXTRA_ARGS
    }

    fn supports_generate(&self) -> bool {
        false
    }

    fn text_prompt(&self, _prompt: &str) -> Result<RenderedPrompt> {
        Err(FmError::not_supported(FAMILY, "generate"))
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        let (system, turns) = templates::split_system(conversation);
        let messages = turns
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::Assistant => "CHATBOT",
                    _ => "USER",
                };
                json!({"role": role, "message": turn.content})
            })
            .collect();
        Ok(RenderedPrompt::Messages {
            system: system.map(str::to_string),
            messages,
        })
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let RenderedPrompt::Messages { system, messages } = prompt else {
            return Err(FmError::not_supported(FAMILY, "generate"));
        };
        let (last, history) = messages
            .split_last()
            .ok_or_else(|| FmError::InvalidInput(format!("{FAMILY} needs at least one message")))?;
        let message = required_str(last, "/message", FAMILY)?;

        let mut body: Map<String, Value> = params.extra_args.clone();
        if let Some(system) = system
            && !body.contains_key("preamble")
        {
            body.insert("preamble".into(), system.as_str().into());
        }
        body.insert("message".into(), message.into());
        body.insert("chat_history".into(), Value::Array(history.to_vec()));
        body.insert("max_tokens".into(), params.max_token_count.into());
        body.insert("p".into(), params.top_p_value());
        body.insert("temperature".into(), params.temperature_value());
        Ok(Value::Object(body))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        Ok(vec![required_str(body, "/text", FAMILY)?.to_string()])
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        if chunk.get("is_finished").and_then(Value::as_bool) == Some(true) {
            return Ok(Chunk::Finished);
        }
        Ok(match chunk.get("text").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Chunk::Text(text.to_string()),
            _ => Chunk::Empty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::testing::{chat_body, fixture_params, generate_body};

    #[test]
    fn generate_is_not_supported() {
        match generate_body(&CommandR, "Hello", &fixture_params()).unwrap_err() {
            FmError::InvocationNotSupported { family, operation } => {
                assert_eq!(family, FAMILY);
                assert_eq!(operation, "generate");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn renders_user_and_chatbot_roles() {
        let RenderedPrompt::Messages { system, messages } = CommandR
            .render_prompt(&[Turn::human("H"), Turn::assistant("A")])
            .unwrap()
        else {
            panic!("expected messages");
        };
        assert!(system.is_none());
        assert_eq!(
            messages,
            vec![
                json!({"role": "USER", "message": "H"}),
                json!({"role": "CHATBOT", "message": "A"})
            ]
        );
    }

    #[test]
    fn full_whitelist_body() {
        let params = fixture_params()
            .with_top_p(0.99)
            .with_extra_arg("k", 0.99)
            .with_extra_arg("documents", json!([{"title": "T", "snippet": "S"}]))
            .with_extra_arg("search_queries_only", true)
            .with_extra_arg("preamble", "P")
            .with_extra_arg("prompt_truncation", "P")
            .with_extra_arg("frequency_penalty", 0)
            .with_extra_arg("presence_penalty", 0)
            .with_extra_arg("seed", 1)
            .with_extra_arg("return_prompt", true)
            .with_extra_arg(
                "tools",
                json!([{
                    "name": "N",
                    "description": "D",
                    "parameter_definitions": {
                        "parameter name": {"description": "D", "type": "T", "required": true}
                    }
                }]),
            )
            .with_extra_arg(
                "tool_results",
                json!([{
                    "call": {"name": "N", "parameters": {"parameter name": "N"}},
                    "outputs": [{"text": "T"}]
                }]),
            )
            .with_extra_arg("stop_sequences", json!(["S"]))
            .with_extra_arg("raw_prompting", false);
        assert_eq!(
            chat_body(&CommandR, &[Turn::human("H")], &params, false).unwrap(),
            r#"{"k":0.99,"documents":[{"title":"T","snippet":"S"}],"search_queries_only":true,"preamble":"P","prompt_truncation":"P","frequency_penalty":0,"presence_penalty":0,"seed":1,"return_prompt":true,"tools":[{"name":"N","description":"D","parameter_definitions":{"parameter name":{"description":"D","type":"T","required":true}}}],"tool_results":[{"call":{"name":"N","parameters":{"parameter name":"N"}},"outputs":[{"text":"T"}]}],"stop_sequences":["S"],"raw_prompting":false,"message":"H","chat_history":[],"max_tokens":500,"p":0.99,"temperature":0.5}"#
        );
    }

    #[test]
    fn system_becomes_preamble_unless_given() {
        let conv = [
            Turn::system("Be brief"),
            Turn::human("H"),
            Turn::assistant("A"),
            Turn::human("H2"),
        ];
        assert_eq!(
            chat_body(&CommandR, &conv, &fixture_params(), false).unwrap(),
            r#"{"preamble":"Be brief","message":"H2","chat_history":[{"role":"USER","message":"H"},{"role":"CHATBOT","message":"A"}],"max_tokens":500,"p":1,"temperature":0.5}"#
        );

        let explicit = fixture_params().with_extra_arg("preamble", "P");
        let body: Value =
            serde_json::from_str(&chat_body(&CommandR, &conv, &explicit, false).unwrap()).unwrap();
        assert_eq!(body["preamble"], "P");
    }

    #[test]
    fn unknown_arg_is_refused() {
        let params = fixture_params().with_extra_arg("n", 2);
        assert!(matches!(
            chat_body(&CommandR, &[Turn::human("H")], &params, false),
            Err(FmError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn decodes_text_and_stream_events() {
        assert_eq!(
            CommandR.decode_response(&json!({"text": "Hi", "generation_id": "g"})).unwrap(),
            vec!["Hi"]
        );
        assert_eq!(
            CommandR
                .decode_chunk(&json!({"event_type": "stream-start", "is_finished": false}))
                .unwrap(),
            Chunk::Empty
        );
        assert_eq!(
            CommandR
                .decode_chunk(&json!({"event_type": "text-generation", "text": "Hi", "is_finished": false}))
                .unwrap(),
            Chunk::Text("Hi".into())
        );
        assert_eq!(
            CommandR
                .decode_chunk(&json!({"event_type": "stream-end", "is_finished": true}))
                .unwrap(),
            Chunk::Finished
        );
    }
}
