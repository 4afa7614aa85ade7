//! # bedrock-fm
//!
//! One invocation contract over the heterogeneous Amazon Bedrock foundation
//! models: pick a model by id, then `generate` from a prompt or `chat` over a
//! conversation, with or without streaming, with or without invocation
//! details. Image and embedding models get `generate` and `embed`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bedrock_fm::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bedrock = Bedrock::from_env()?;
//!     let model = bedrock.text(catalog::anthropic::CLAUDE_3_HAIKU)?;
//!
//!     let answer = model
//!         .chat(
//!             &[system!("Answer in one sentence."), human!("What is Bedrock?")],
//!             &GenerationParams::new().with_temperature(0.2),
//!         )
//!         .await?;
//!     println!("{}", answer[0]);
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - `bedrock-fm-spec`: value types and errors
//! - `bedrock-fm-core`: transport, event-stream decoding, invocation engines
//! - `bedrock-fm-provider`: one transcoder per model family
//! - `bedrock-fm-registry`: model id resolution
#![deny(unsafe_code)]

pub mod client;
mod macros;

pub use bedrock_fm_core::{
    BedrockConfig, BedrockConfigBuilder, BedrockTransport, EmbeddingModel, FmError,
    FoundationModel, HttpTransport, ImageModel, Result, config, defaults, error, execution,
    observability, params, streaming, transcoder, types,
};
pub use bedrock_fm_provider::{EmbeddingFamily, ImageFamily, TextFamily, standards};
pub use bedrock_fm_registry::{
    BedrockModel, Family, Modality, catalog, embedding_model, from_model_id, image_model,
    resolve, resolver, text_model,
};
pub use client::Bedrock;

pub mod prelude {
    pub use crate::client::Bedrock;
    pub use crate::{assistant, human, system};
    pub use bedrock_fm_core::error::{ConversationRule, FmError, Result};
    pub use bedrock_fm_core::streaming::{CancelHandle, make_cancellable_stream};
    pub use bedrock_fm_core::transcoder::{EmbeddingTranscoder, ImageTranscoder, TextTranscoder};
    pub use bedrock_fm_core::types::*;
    pub use bedrock_fm_core::{
        BedrockConfig, BedrockTransport, EmbeddingModel, FoundationModel, HttpTransport,
        ImageModel,
    };
    pub use bedrock_fm_provider::{EmbeddingFamily, ImageFamily, TextFamily};
    pub use bedrock_fm_registry::{BedrockModel, Modality, catalog, from_model_id};
}
