//! Llama 2 Chat (`meta.llama2-*-chat-*`).

use super::generation_chunk;
use crate::error::{FmError, Result};
use crate::params::EffectiveParams;
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::Turn;
use crate::utils::json::required_str;
use serde_json::{Value, json};

pub const FAMILY: &str = "meta.llama2";

#[derive(Debug, Clone, Copy, Default)]
pub struct Llama2Chat;

impl TextTranscoder for Llama2Chat {
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
        Ok(RenderedPrompt::Text(templates::inst_chat(conversation)))
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
                "prompt": templates::inst_wrap(prompt),
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
