//! Type conversions for FmError
//!
//! `From` implementations for the error types of the crates we decode with.

use super::types::FmError;

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for FmError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for FmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<base64::DecodeError> for FmError {
    fn from(err: base64::DecodeError) -> Self {
        Self::ParseError(format!("invalid base64 payload: {err}"))
    }
}

impl From<image::ImageError> for FmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}
