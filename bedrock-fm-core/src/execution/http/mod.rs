//! Bedrock runtime transport.
//!
//! - [`transport`]: the [`BedrockTransport`] seam and its reqwest implementation
//! - [`errors`]: HTTP status and stream exception classification

pub mod errors;
pub mod transport;

pub use transport::{BedrockTransport, ChunkStream, HttpTransport};
