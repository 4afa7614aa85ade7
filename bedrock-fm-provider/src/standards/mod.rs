//! Family transcoders, grouped by vendor.
//!
//! Each transcoder is a stateless unit struct implementing one of the
//! `bedrock_fm_core::transcoder` traits. Bodies are built as ordered JSON maps:
//! `extra_args` first, then the family's fixed fields.

pub mod ai21;
pub mod amazon;
pub mod anthropic;
pub mod cohere;
pub mod meta;
pub mod mistral;
pub mod stability;

pub(crate) mod templates;
