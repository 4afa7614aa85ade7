//! Invocation engines.
//!
//! Each engine binds a model id, a transcoder and a transport. The engine owns
//! the control flow (validate, resolve, build, invoke, decode); the transcoder
//! owns the payload shapes.

pub mod embedding;
pub mod http;
pub mod image;
pub mod text;

pub use embedding::EmbeddingModel;
pub use image::ImageModel;
pub use text::FoundationModel;
