//! Embedding types.

use serde::{Deserialize, Serialize};

/// One embedding vector.
pub type Embedding = Vec<f32>;

/// What the embedded text will be used for; some backends encode the two differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingKind {
    #[default]
    Document,
    Query,
}
