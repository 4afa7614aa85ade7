//! Accessors for decoding loosely-typed response bodies.

use crate::error::{FmError, Result};
use serde_json::Value;

/// The value at `pointer` (RFC 6901), or a parse error naming `context`.
pub fn required<'a>(value: &'a Value, pointer: &str, context: &str) -> Result<&'a Value> {
    value
        .pointer(pointer)
        .ok_or_else(|| FmError::parse(format!("{context}: missing `{pointer}` in response")))
}

pub fn required_str<'a>(value: &'a Value, pointer: &str, context: &str) -> Result<&'a str> {
    required(value, pointer, context)?
        .as_str()
        .ok_or_else(|| FmError::parse(format!("{context}: `{pointer}` is not a string")))
}

pub fn required_array<'a>(value: &'a Value, pointer: &str, context: &str) -> Result<&'a [Value]> {
    required(value, pointer, context)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| FmError::parse(format!("{context}: `{pointer}` is not an array")))
}

/// Collect `field` (a pointer relative to each element) from every element of the array at `pointer`.
pub fn strings_at(value: &Value, pointer: &str, field: &str, context: &str) -> Result<Vec<String>> {
    required_array(value, pointer, context)?
        .iter()
        .map(|item| required_str(item, field, context).map(str::to_string))
        .collect()
}

/// Parse a float vector.
pub fn float_vector(value: &Value, context: &str) -> Result<Vec<f32>> {
    value
        .as_array()
        .ok_or_else(|| FmError::parse(format!("{context}: embedding is not an array")))?
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| FmError::parse(format!("{context}: non-numeric embedding value")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_nested_strings() {
        let body = json!({"completions": [{"data": {"text": "a"}}, {"data": {"text": "b"}}]});
        assert_eq!(
            strings_at(&body, "/completions", "/data/text", "j2").unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let err = required_str(&json!({}), "/completion", "claude").unwrap_err();
        match err {
            FmError::ParseError(msg) => assert!(msg.contains("/completion")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
