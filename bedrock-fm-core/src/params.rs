//! Parameter resolution.
//!
//! Effective parameters are layered explicitly: call-site values over instance
//! defaults over family defaults. `resolve_params` is the only place this merge
//! happens, once at the top of every invocation.

use crate::defaults;
use crate::types::{ExtraArgs, GenerationParams, json_number};
use serde_json::Value;

/// Family-level fallbacks, used when neither the call nor the instance sets a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyDefaults {
    pub temperature: f64,
    pub top_p: f64,
    pub max_token_count: u32,
    pub stop_sequences: Vec<String>,
}

impl Default for FamilyDefaults {
    fn default() -> Self {
        Self {
            temperature: defaults::generation::TEMPERATURE,
            top_p: defaults::generation::TOP_P,
            max_token_count: defaults::generation::MAX_TOKEN_COUNT,
            stop_sequences: Vec::new(),
        }
    }
}

/// Fully resolved parameters handed to `build_body`.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_token_count: u32,
    pub stop_sequences: Vec<String>,
    pub extra_args: ExtraArgs,
}

impl EffectiveParams {
    pub fn temperature_value(&self) -> Value {
        json_number(self.temperature)
    }

    pub fn top_p_value(&self) -> Value {
        json_number(self.top_p)
    }
}

/// Layer call-site parameters over instance defaults over family defaults.
///
/// Each scalar takes the first value that is set. `extra_args` merge key-wise:
/// instance keys keep their position, call-site keys overwrite them in place or
/// are appended.
pub fn resolve_params(
    call: &GenerationParams,
    instance: &GenerationParams,
    family: &FamilyDefaults,
) -> EffectiveParams {
    let mut extra_args = instance.extra_args.clone();
    for (key, value) in &call.extra_args {
        extra_args.insert(key.clone(), value.clone());
    }

    EffectiveParams {
        temperature: call
            .temperature
            .or(instance.temperature)
            .unwrap_or(family.temperature),
        top_p: call.top_p.or(instance.top_p).unwrap_or(family.top_p),
        max_token_count: call
            .max_token_count
            .or(instance.max_token_count)
            .unwrap_or(family.max_token_count),
        stop_sequences: call
            .stop_sequences
            .clone()
            .or_else(|| instance.stop_sequences.clone())
            .unwrap_or_else(|| family.stop_sequences.clone()),
        extra_args,
    }
}
