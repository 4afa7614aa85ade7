//! JSON number helpers.

use serde_json::Value;

/// Encode a float as a JSON number, using the integer form when the value is whole.
///
/// Bedrock bodies are compared byte-for-byte in tests and by some backends'
/// validators, so `1.0` must serialize as `1` while `0.5` stays `0.5`.
pub fn json_number(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_values_become_integers() {
        assert_eq!(json_number(1.0).to_string(), "1");
        assert_eq!(json_number(-3.0).to_string(), "-3");
        assert_eq!(json_number(0.5).to_string(), "0.5");
        assert_eq!(json_number(0.99).to_string(), "0.99");
        assert_eq!(json_number(f64::NAN), Value::Null);
    }
}
