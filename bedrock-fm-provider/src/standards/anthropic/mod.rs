//! Anthropic Claude families.

mod claude;
mod claude3;

pub use claude::Claude;
pub use claude3::Claude3;

pub(crate) const SUPPORTED_EXTRA_ARGS: &[&str] = &["top_k"];
