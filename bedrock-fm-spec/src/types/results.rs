//! Invocation result shapes.
//!
//! Four shapes exist, selected by two independent flags (`stream`, `details`):
//! a plain list of candidates, a lazy stream of fragments, and the detailed
//! variants of both that also carry the wire body, latency and original prompt.

use super::conversation::Turn;
use crate::error::Result;
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;

/// Single-pass stream of text fragments backed by the remote response.
///
/// Dropping it before exhaustion releases the underlying connection.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// The prompt as the caller supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptInput {
    Text(String),
    Conversation(Vec<Turn>),
}

impl PromptInput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Conversation(_) => None,
        }
    }

    pub fn as_conversation(&self) -> Option<&[Turn]> {
        match self {
            Self::Text(_) => None,
            Self::Conversation(turns) => Some(turns),
        }
    }
}

impl From<&str> for PromptInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for PromptInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<Turn>> for PromptInput {
    fn from(turns: Vec<Turn>) -> Self {
        Self::Conversation(turns)
    }
}

/// A completed (non-streaming) invocation plus its metadata.
#[derive(Debug, Clone)]
pub struct CompletionDetails {
    /// One string per generated candidate.
    pub output: Vec<String>,
    /// The exact serialized request body.
    pub body: String,
    /// Wall-clock time of the remote call only.
    pub latency: Duration,
    pub prompt: PromptInput,
    /// The decoded response body.
    pub response: serde_json::Value,
}

/// A streaming invocation plus its metadata.
///
/// The metadata is available before the stream is polled; `latency` measures
/// the time taken to open the stream.
pub struct StreamDetails {
    pub stream: TextStream,
    pub body: String,
    pub latency: Duration,
    pub prompt: PromptInput,
}

impl std::fmt::Debug for StreamDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDetails")
            .field("body", &self.body)
            .field("latency", &self.latency)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// Which of the four result shapes to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InvocationMode {
    pub stream: bool,
    pub details: bool,
}

impl InvocationMode {
    pub const LIST: Self = Self::new(false, false);
    pub const STREAM: Self = Self::new(true, false);
    pub const DETAILED: Self = Self::new(false, true);
    pub const DETAILED_STREAM: Self = Self::new(true, true);

    pub const fn new(stream: bool, details: bool) -> Self {
        Self { stream, details }
    }
}

/// Tagged result of a flag-driven invocation.
pub enum Invocation {
    List(Vec<String>),
    Stream(TextStream),
    Detailed(CompletionDetails),
    DetailedStream(StreamDetails),
}

impl Invocation {
    pub const fn mode(&self) -> InvocationMode {
        match self {
            Self::List(_) => InvocationMode::LIST,
            Self::Stream(_) => InvocationMode::STREAM,
            Self::Detailed(_) => InvocationMode::DETAILED,
            Self::DetailedStream(_) => InvocationMode::DETAILED_STREAM,
        }
    }

    pub fn into_list(self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn into_stream(self) -> Option<TextStream> {
        match self {
            Self::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn into_detailed(self) -> Option<CompletionDetails> {
        match self {
            Self::Detailed(details) => Some(details),
            _ => None,
        }
    }

    pub fn into_detailed_stream(self) -> Option<StreamDetails> {
        match self {
            Self::DetailedStream(details) => Some(details),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
            Self::Detailed(details) => f.debug_tuple("Detailed").field(details).finish(),
            Self::DetailedStream(details) => {
                f.debug_tuple("DetailedStream").field(details).finish()
            }
        }
    }
}
