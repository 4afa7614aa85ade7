//! Meta Llama families. Both are chat only and accept no extra arguments.

mod llama2;
mod llama3;

pub use llama2::Llama2Chat;
pub use llama3::Llama3Instruct;

use crate::error::Result;
use crate::utils::json::required_str;
use crate::transcoder::Chunk;
use serde_json::Value;

/// Llama responses and chunks both carry the text in `generation`.
pub(crate) fn generation_chunk(chunk: &Value, family: &str) -> Result<Chunk> {
    let text = required_str(chunk, "/generation", family)?;
    Ok(if text.is_empty() {
        Chunk::Empty
    } else {
        Chunk::Text(text.to_string())
    })
}
