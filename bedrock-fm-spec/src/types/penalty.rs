//! Repetition penalties (AI21 Jurassic-2).

use super::number::json_number;
use crate::error::{FmError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Scale plus the five token categories the penalty applies to.
///
/// Serializes with the camel-cased keys the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    pub scale: f64,
    pub apply_to_whitespaces: bool,
    pub apply_to_punctuations: bool,
    pub apply_to_numbers: bool,
    pub apply_to_stopwords: bool,
    pub apply_to_emojis: bool,
}

impl Penalty {
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    pub fn apply_to_whitespaces(mut self, on: bool) -> Self {
        self.apply_to_whitespaces = on;
        self
    }

    pub fn apply_to_punctuations(mut self, on: bool) -> Self {
        self.apply_to_punctuations = on;
        self
    }

    pub fn apply_to_numbers(mut self, on: bool) -> Self {
        self.apply_to_numbers = on;
        self
    }

    pub fn apply_to_stopwords(mut self, on: bool) -> Self {
        self.apply_to_stopwords = on;
        self
    }

    pub fn apply_to_emojis(mut self, on: bool) -> Self {
        self.apply_to_emojis = on;
        self
    }

    /// Reject a scale outside the backend range for `kind`.
    pub fn validate(&self, kind: PenaltyKind) -> Result<()> {
        validate_scale(kind, self.scale)
    }

    /// Wire form; whole scales are emitted as integers.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "scale": json_number(self.scale),
            "applyToWhitespaces": self.apply_to_whitespaces,
            "applyToPunctuations": self.apply_to_punctuations,
            "applyToNumbers": self.apply_to_numbers,
            "applyToStopwords": self.apply_to_stopwords,
            "applyToEmojis": self.apply_to_emojis,
        })
    }
}

/// The three named penalties sharing the [`Penalty`] shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenaltyKind {
    Count,
    Presence,
    Frequency,
}

impl PenaltyKind {
    pub const ALL: [PenaltyKind; 3] = [Self::Count, Self::Presence, Self::Frequency];

    pub const fn extra_arg_key(&self) -> &'static str {
        match self {
            Self::Count => "countPenalty",
            Self::Presence => "presencePenalty",
            Self::Frequency => "frequencyPenalty",
        }
    }

    /// Accepted `scale` values.
    pub fn scale_range(&self) -> RangeInclusive<f64> {
        match self {
            Self::Count | Self::Presence => 0.0..=5.0,
            Self::Frequency => 0.0..=500.0,
        }
    }
}

pub(crate) fn validate_scale(kind: PenaltyKind, scale: f64) -> Result<()> {
    let range = kind.scale_range();
    if range.contains(&scale) {
        return Ok(());
    }
    Err(FmError::InvalidParameter(format!(
        "{} scale must be between {} and {}, got {scale}",
        kind.extra_arg_key(),
        range.start(),
        range.end()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_in_declared_order() {
        let p = Penalty::new(1.0).apply_to_numbers(true);
        assert_eq!(
            serde_json::to_string(&p.to_value()).unwrap(),
            r#"{"scale":1,"applyToWhitespaces":false,"applyToPunctuations":false,"applyToNumbers":true,"applyToStopwords":false,"applyToEmojis":false}"#
        );
    }

    #[test]
    fn serde_round_trip_uses_camel_case() {
        let p: Penalty = serde_json::from_str(
            r#"{"scale":0.5,"applyToWhitespaces":true,"applyToPunctuations":false,"applyToNumbers":false,"applyToStopwords":false,"applyToEmojis":true}"#,
        )
        .unwrap();
        assert!(p.apply_to_whitespaces && p.apply_to_emojis);
        assert_eq!(p.scale, 0.5);
    }

    #[test]
    fn scale_bounds_per_kind() {
        let eps = 1e-9;
        for kind in PenaltyKind::ALL {
            let range = kind.scale_range();
            let (low, high) = (*range.start(), *range.end());
            assert!(Penalty::new(low).validate(kind).is_ok());
            assert!(Penalty::new(high).validate(kind).is_ok());
            for bad in [low - eps, high + eps, f64::NAN] {
                match Penalty::new(bad).validate(kind).unwrap_err() {
                    FmError::InvalidParameter(message) => {
                        assert!(message.starts_with(kind.extra_arg_key()), "{message}")
                    }
                    other => panic!("unexpected error variant: {other:?}"),
                }
            }
        }
        assert_eq!(PenaltyKind::Frequency.scale_range(), 0.0..=500.0);
    }
}
