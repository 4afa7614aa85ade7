//! Legacy Claude text completions (`anthropic.claude-v2`, `anthropic.claude-instant-*`).

use super::SUPPORTED_EXTRA_ARGS;
use crate::defaults::anthropic::{ASSISTANT_PROMPT, HUMAN_PROMPT, VERSION};
use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::{Role, Turn};
use crate::utils::json::required_str;
use serde_json::{Value, json};

pub const FAMILY: &str = "anthropic.claude";

#[derive(Debug, Clone, Copy, Default)]
pub struct Claude;

/// Bring a free-form prompt into `Human: … Assistant:` shape.
///
/// A prompt that does not open with a Human cue gets one, and a closing
/// Assistant cue is appended unless the prompt already ends on one.
fn completion_prompt(prompt: &str) -> String {
    let mut out = if prompt.starts_with(HUMAN_PROMPT) || prompt.starts_with("Human:") {
        prompt.to_string()
    } else {
        format!("Human: {prompt}")
    };
    let open = match out.rfind(ASSISTANT_PROMPT) {
        None => true,
        Some(at) => out[at..].contains("Human:"),
    };
    if open {
        out.push_str(ASSISTANT_PROMPT);
    }
    out
}

impl TextTranscoder for Claude {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        SUPPORTED_EXTRA_ARGS
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        let (system, turns) = templates::split_system(conversation);
        let mut out = String::new();
        let mut turns = turns.iter();
        if let Some(system) = system
            && let Some(first) = turns.next()
        {
            out.push_str(&format!("{HUMAN_PROMPT} {system} {}", first.content));
        }
        for turn in turns {
            let cue = match turn.role {
                Role::Assistant => ASSISTANT_PROMPT,
                _ => HUMAN_PROMPT,
            };
            out.push_str(&format!("{cue} {}", turn.content));
        }
        Ok(RenderedPrompt::Text(out))
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        _stream: bool,
    ) -> Result<Value> {
        let prompt = prompt
            .as_text()
            .ok_or_else(|| FmError::InvalidInput(format!("{FAMILY} expects a text prompt")))?;
        let mut stop_sequences = params.stop_sequences.clone();
        if !stop_sequences.iter().any(|s| s == HUMAN_PROMPT) {
            stop_sequences.push(HUMAN_PROMPT.to_string());
        }
        Ok(spread_body(
            &params.extra_args,
            json!({
                "prompt": completion_prompt(prompt),
                "max_tokens_to_sample": params.max_token_count,
                "stop_sequences": stop_sequences,
                "temperature": params.temperature_value(),
                "top_p": params.top_p_value(),
                "anthropic_version": VERSION,
            }),
        ))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        Ok(vec![required_str(body, "/completion", FAMILY)?.to_string()])
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        let text = required_str(chunk, "/completion", FAMILY)?;
        Ok(if text.is_empty() {
            Chunk::Empty
        } else {
            Chunk::Text(text.to_string())
        })
    }
}
