//! bedrock-fm-registry
//!
//! Model id resolution and factories: maps a Bedrock model id to its family
//! and binds it to a transport.
#![deny(unsafe_code)]

pub use bedrock_fm_core::{FmError, Result, error, types};

pub mod catalog;
pub mod factory;
pub mod resolver;

pub use factory::{BedrockModel, embedding_model, from_model_id, image_model, text_model};
pub use resolver::{Family, Modality, resolve};
