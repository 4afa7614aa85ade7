//! Generation parameters.
//!
//! Every field is optional: `None` means "fall back to the instance default, then
//! to the family default". The resolution itself lives in `bedrock-fm-core`.

use super::penalty::{Penalty, PenaltyKind, validate_scale};
use crate::error::{FmError, Result};
use serde::{Deserialize, Serialize};

/// Backend-specific arguments, spread into the wire body ahead of the fixed fields.
pub type ExtraArgs = serde_json::Map<String, serde_json::Value>;

/// Per-call (or per-instance) generation parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_token_count: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra_args: ExtraArgs,
}

impl GenerationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::new()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_token_count(mut self, max_token_count: u32) -> Self {
        self.max_token_count = Some(max_token_count);
        self
    }

    pub fn with_stop_sequences<I, S>(mut self, sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = Some(sequences.into_iter().map(Into::into).collect());
        self
    }

    /// Add a backend-specific argument. Later calls overwrite earlier values for the same key.
    pub fn with_extra_arg(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra_args.insert(key.into(), value.into());
        self
    }

    pub fn with_extra_args(mut self, args: ExtraArgs) -> Self {
        self.extra_args.extend(args);
        self
    }

    /// Attach a Jurassic-style repetition penalty under its camel-cased key.
    pub fn with_penalty(self, kind: PenaltyKind, penalty: Penalty) -> Self {
        let value = penalty.to_value();
        self.with_extra_arg(kind.extra_arg_key(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.top_p.is_none()
            && self.max_token_count.is_none()
            && self.stop_sequences.is_none()
            && self.extra_args.is_empty()
    }

    /// Range checks that do not depend on the backend.
    pub fn validate(&self) -> Result<()> {
        if let Some(temperature) = self.temperature
            && !(temperature >= 0.0 && temperature.is_finite())
        {
            return Err(FmError::InvalidParameter(
                "temperature must be a finite, non-negative number".to_string(),
            ));
        }

        if let Some(top_p) = self.top_p
            && !(0.0..=1.0).contains(&top_p)
        {
            return Err(FmError::InvalidParameter(
                "top_p must be between 0.0 and 1.0".to_string(),
            ));
        }

        if self.max_token_count == Some(0) {
            return Err(FmError::InvalidParameter(
                "max_token_count must be greater than zero".to_string(),
            ));
        }

        for kind in PenaltyKind::ALL {
            if let Some(scale) = self
                .extra_args
                .get(kind.extra_arg_key())
                .and_then(|penalty| penalty.get("scale"))
            {
                let scale = scale.as_f64().ok_or_else(|| {
                    FmError::InvalidParameter(format!(
                        "{} scale must be a number",
                        kind.extra_arg_key()
                    ))
                })?;
                validate_scale(kind, scale)?;
            }
        }

        Ok(())
    }
}

/// Builder for [`GenerationParams`] with validation on `build`.
#[derive(Debug, Clone, Default)]
pub struct GenerationParamsBuilder {
    params: GenerationParams,
}

impl GenerationParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.params.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.params.top_p = Some(top_p);
        self
    }

    pub fn max_token_count(mut self, max_token_count: u32) -> Self {
        self.params.max_token_count = Some(max_token_count);
        self
    }

    pub fn stop_sequences(mut self, sequences: Vec<String>) -> Self {
        self.params.stop_sequences = Some(sequences);
        self
    }

    pub fn extra_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.extra_args.insert(key.into(), value.into());
        self
    }

    pub fn penalty(mut self, kind: PenaltyKind, penalty: Penalty) -> Self {
        self.params = self.params.with_penalty(kind, penalty);
        self
    }

    pub fn build(self) -> Result<GenerationParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}
