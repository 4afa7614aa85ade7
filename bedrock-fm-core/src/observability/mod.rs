//! Observability
//!
//! Library code only emits `tracing` events under the `bedrock_fm::*` targets:
//!
//! - `bedrock_fm::invoke`: model id, family, stream flag, latency
//! - `bedrock_fm::http`: request URL and failure status
//! - `bedrock_fm::stream`: fragment counts and early termination
//! - `bedrock_fm::registry`: model id resolution
//!
//! Applications either install their own subscriber or use [`telemetry`].

pub mod telemetry;

pub use telemetry::{OutputFormat, SubscriberConfig, SubscriberConfigBuilder, init_subscriber};
