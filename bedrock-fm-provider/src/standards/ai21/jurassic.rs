//! Jurassic-2 (`ai21.j2-*`). Non-streaming completions with typed penalties.

use crate::error::{FmError, Result};
use crate::params::{EffectiveParams, FamilyDefaults};
use crate::standards::templates;
use crate::transcoder::{Chunk, RenderedPrompt, TextTranscoder, spread_body};
use crate::types::Turn;
use crate::utils::json::strings_at;
use serde_json::{Value, json};

pub const FAMILY: &str = "ai21.j2";

/// Keys of the three `PenaltyKind`s.
const SUPPORTED_EXTRA_ARGS: &[&str] = &["countPenalty", "presencePenalty", "frequencyPenalty"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Jurassic;

impl TextTranscoder for Jurassic {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        SUPPORTED_EXTRA_ARGS
    }

    fn supports_streaming(&self) -> bool {
        false
    }

    fn family_defaults(&self) -> FamilyDefaults {
        FamilyDefaults {
            temperature: 0.5,
            top_p: 0.9,
            ..FamilyDefaults::default()
        }
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        templates::reject_images(FAMILY, conversation)?;
        Ok(RenderedPrompt::Text(templates::transcript(
            conversation,
            "User",
            "Assistant",
        )))
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
                "maxTokens": params.max_token_count,
                "stopSequences": params.stop_sequences,
                "temperature": params.temperature_value(),
                "topP": params.top_p_value(),
            }),
        ))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        strings_at(body, "/completions", "/data/text", FAMILY)
    }

    fn decode_chunk(&self, _chunk: &Value) -> Result<Chunk> {
        Err(FmError::not_supported(FAMILY, "streaming"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::testing::{fixture_params, generate_body};
    use crate::types::{GenerationParams, Penalty, PenaltyKind};

    #[test]
    fn family_defaults_apply() {
        assert_eq!(
            generate_body(&Jurassic, "A", &GenerationParams::default()).unwrap(),
            r#"{"prompt":"A","maxTokens":500,"stopSequences":[],"temperature":0.5,"topP":0.9}"#
        );
    }

    #[test]
    fn penalties_are_spread_first() {
        let params = fixture_params()
            .with_penalty(PenaltyKind::Frequency, Penalty::new(2.0))
            .with_penalty(PenaltyKind::Count, Penalty::new(0.5).apply_to_emojis(true));
        let body = generate_body(&Jurassic, "A", &params).unwrap();
        assert_eq!(
            body,
            r#"{"frequencyPenalty":{"scale":2,"applyToWhitespaces":false,"applyToPunctuations":false,"applyToNumbers":false,"applyToStopwords":false,"applyToEmojis":false},"countPenalty":{"scale":0.5,"applyToWhitespaces":false,"applyToPunctuations":false,"applyToNumbers":false,"applyToStopwords":false,"applyToEmojis":true},"prompt":"A","maxTokens":500,"stopSequences":[],"temperature":0.5,"topP":1}"#
        );
    }

    #[test]
    fn whitelist_matches_penalty_kinds() {
        for kind in PenaltyKind::ALL {
            assert!(SUPPORTED_EXTRA_ARGS.contains(&kind.extra_arg_key()));
        }
    }

    #[test]
    fn unknown_penalty_key_is_refused() {
        let params = fixture_params().with_extra_arg("frequencePenalty", json!({"scale": 1}));
        assert!(matches!(
            generate_body(&Jurassic, "A", &params),
            Err(FmError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn decodes_completions() {
        let body = json!({"completions": [{"data": {"text": "one"}}, {"data": {"text": "two"}}]});
        assert_eq!(Jurassic.decode_response(&body).unwrap(), vec!["one", "two"]);
        assert!(!Jurassic.supports_streaming());
    }
}
