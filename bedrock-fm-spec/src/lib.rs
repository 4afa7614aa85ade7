//! bedrock-fm-spec
//!
//! Model-agnostic value types for bedrock-fm.
//!
//! This crate contains only plain value types: errors, conversation
//! turns, generation parameters and result shapes. Transport, streaming, the
//! invocation engines and the per-family transcoders live in other crates
//! (`bedrock-fm-core`, `bedrock-fm-provider`).
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::{FmError, Result};
