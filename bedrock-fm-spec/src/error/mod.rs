//! Error handling types for bedrock-fm.
//!
//! This module is intentionally dependency-light and shared across crates.
//!
//! ```rust,ignore
//! use bedrock_fm_spec::error::FmError;
//!
//! let err = FmError::UnsupportedModel("cohere".into());
//! assert!(err.is_preflight());
//! assert!(!err.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
