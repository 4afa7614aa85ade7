//! Streaming support.
//!
//! - [`eventstream`]: AWS `application/vnd.amazon.eventstream` framing
//! - [`text`]: turns decoded chunk payloads into a [`TextStream`](crate::types::TextStream)
//! - [`cancel`]: caller-side cancellation for text streams

pub mod cancel;
pub mod eventstream;
pub mod text;

pub use cancel::{CancelHandle, make_cancellable_stream};
pub use eventstream::{EventStreamDecoder, EventStreamMessage, HeaderValue};
pub use text::text_stream;
