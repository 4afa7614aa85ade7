//! Shared value types.
//!
//! Everything in here is plain data: constructed per call-site, validated
//! locally and handed to the runtime in `bedrock-fm-core`.

pub mod conversation;
pub mod embedding;
pub mod image;
pub mod image_request;
pub mod number;
pub mod params;
pub mod penalty;
pub mod results;

pub use conversation::{Role, Turn, validate_conversation};
pub use embedding::{Embedding, EmbeddingKind};
pub use image::Image;
pub use image_request::{
    ClipGuidancePreset, ControlMode, ImageCondition, ImageQuality, ImageRequest, ImageTask,
    OutpaintingMode, StylePreset, WeightedPrompt,
};
pub use number::json_number;
pub use params::{ExtraArgs, GenerationParams, GenerationParamsBuilder};
pub use penalty::{Penalty, PenaltyKind};
pub use results::{
    CompletionDetails, Invocation, InvocationMode, PromptInput, StreamDetails, TextStream,
};
