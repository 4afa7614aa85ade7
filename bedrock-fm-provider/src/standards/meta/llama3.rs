//! Llama 3+ Instruct (`meta.llama3-*`), header-token prompt format.

use super::generation_chunk;
use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::{Role, Turn};
use crate::utils::json::required_str;
use serde_json::{Value, json};

pub const FAMILY: &str = "meta.llama3";

const BEGIN_OF_TEXT: &str = "<|begin_of_text|>";
const END_OF_TURN: &str = "<|eot_id|>";

#[derive(Debug, Clone, Copy, Default)]
pub struct Llama3Instruct;

fn header(role: &str) -> String {
    format!("<|start_header_id|>{role}<|end_header_id|>")
}

impl TextTranscoder for Llama3Instruct {
    fn family(&self) -> &'static str {
        FAMILY
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
        let mut out = String::from(BEGIN_OF_TEXT);
        if let Some(system) = system {
            out.push_str(&header("system"));
            out.push_str("\n\n");
            out.push_str(system);
            out.push_str(END_OF_TURN);
        }
        for turn in turns {
            let role = match turn.role {
                Role::Assistant => "assistant",
                _ => "user",
            };
            out.push_str(&header(role));
            out.push_str("\n\n");
            out.push_str(&turn.content);
            out.push_str(END_OF_TURN);
            out.push('\n');
        }
        out.push_str(&header("assistant"));
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
        Ok(spread_body(
            &params.extra_args,
            json!({
                "prompt": prompt,
                "max_gen_len": params.max_token_count,
                "temperature": params.temperature_value(),
                "top_p": params.top_p_value(),
            }),
        ))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        Ok(vec![required_str(body, "/generation", FAMILY)?.to_string()])
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        generation_chunk(chunk, FAMILY)
    }
}
