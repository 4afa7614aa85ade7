//! Chunk payloads to text fragments.

use crate::error::FmError;
use crate::execution::http::ChunkStream;
use crate::transcoder::{Chunk, TextTranscoder};
use crate::types::TextStream;
use futures::StreamExt;
use serde_json::Value;

/// Decode each chunk payload with `transcoder` and yield its text.
///
/// Empty chunks are skipped, a `Finished` chunk ends the stream, and the first
/// error is yielded once before the stream ends.
pub fn text_stream<T>(transcoder: T, mut chunks: ChunkStream) -> TextStream
where
    T: TextTranscoder + 'static,
{
    let family = transcoder.family();
    let stream = async_stream::stream! {
        let mut fragments = 0usize;
        while let Some(item) = chunks.next().await {
            let payload = match item {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!(target: "bedrock_fm::stream", family, error = %e, "stream failed");
                    yield Err(e);
                    return;
                }
            };

            let chunk = serde_json::from_slice::<Value>(&payload)
                .map_err(FmError::from)
                .and_then(|value| transcoder.decode_chunk(&value));

            match chunk {
                Ok(Chunk::Text(text)) => {
                    fragments += 1;
                    yield Ok(text);
                }
                Ok(Chunk::Empty) => {}
                Ok(Chunk::Finished) => break,
                Err(e) => {
                    tracing::debug!(target: "bedrock_fm::stream", family, error = %e, "undecodable chunk");
                    yield Err(e);
                    return;
                }
            }
        }
        tracing::trace!(target: "bedrock_fm::stream", family, fragments, "stream finished");
    };
    Box::pin(stream)
}
