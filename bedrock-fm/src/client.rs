//! Shared-transport entry point.

use bedrock_fm_core::config::BedrockConfig;
use bedrock_fm_core::error::Result;
use bedrock_fm_core::execution::http::{BedrockTransport, HttpTransport};
use bedrock_fm_core::execution::{EmbeddingModel, FoundationModel, ImageModel};
use bedrock_fm_provider::{EmbeddingFamily, ImageFamily, TextFamily};
use bedrock_fm_registry::{BedrockModel, factory};
use std::sync::Arc;

/// Owns one transport and hands out models bound to it.
///
/// Models are cheap to create; every model built from the same `Bedrock`
/// shares its connection pool.
#[derive(Clone)]
pub struct Bedrock {
    transport: Arc<dyn BedrockTransport>,
}

impl std::fmt::Debug for Bedrock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bedrock").finish_non_exhaustive()
    }
}

impl Bedrock {
    pub fn new(config: &BedrockConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&BedrockConfig::from_env())
    }

    /// Use a custom transport (SigV4-signing client, test double, ...).
    pub fn with_transport(transport: Arc<dyn BedrockTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn BedrockTransport> {
        Arc::clone(&self.transport)
    }

    pub fn model(&self, model_id: impl Into<String>) -> Result<BedrockModel> {
        factory::from_model_id(model_id, self.transport())
    }

    pub fn text(&self, model_id: impl Into<String>) -> Result<FoundationModel<TextFamily>> {
        factory::text_model(model_id, self.transport())
    }

    pub fn image(&self, model_id: impl Into<String>) -> Result<ImageModel<ImageFamily>> {
        factory::image_model(model_id, self.transport())
    }

    pub fn embedding(
        &self,
        model_id: impl Into<String>,
    ) -> Result<EmbeddingModel<EmbeddingFamily>> {
        factory::embedding_model(model_id, self.transport())
    }
}
