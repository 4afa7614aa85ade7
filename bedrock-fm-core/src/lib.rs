//! bedrock-fm-core
//!
//! Model-agnostic runtime: the transcoder contracts every model family
//! implements, parameter resolution, the Bedrock runtime transport, the AWS
//! event-stream decoder and the three invocation engines (text, image,
//! embedding).
#![deny(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod execution;
pub mod observability;
pub mod params;
pub mod streaming;
pub mod transcoder;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export of the shared error types.
pub mod error {
    pub use bedrock_fm_spec::error::*;
}

/// Re-export of the shared value types.
pub mod types {
    pub use bedrock_fm_spec::types::*;
}

pub use config::{BedrockConfig, BedrockConfigBuilder};
pub use error::{FmError, Result};
pub use execution::http::{BedrockTransport, ChunkStream, HttpTransport};
pub use execution::{EmbeddingModel, FoundationModel, ImageModel};
pub use transcoder::{Chunk, EmbeddingTranscoder, ImageTranscoder, RenderedPrompt, TextTranscoder};
