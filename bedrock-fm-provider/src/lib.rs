//! bedrock-fm-provider
//!
//! Request/response transcoders for every supported Bedrock model family,
//! grouped by vendor under [`standards`], and the closed family enums the
//! registry dispatches through.
#![deny(unsafe_code)]

pub use bedrock_fm_core::{
    FmError, Result, config, defaults, error, execution, observability, params, streaming,
    transcoder, types, utils,
};

pub mod families;
pub mod standards;

pub use families::{EmbeddingFamily, ImageFamily, TextFamily};
