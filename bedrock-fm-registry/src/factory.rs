//! Model factories.

use crate::resolver::{Family, Modality, resolve};
use bedrock_fm_core::error::{FmError, Result};
use bedrock_fm_core::execution::http::BedrockTransport;
use bedrock_fm_core::execution::{EmbeddingModel, FoundationModel, ImageModel};
use bedrock_fm_provider::{EmbeddingFamily, ImageFamily, TextFamily};
use std::sync::Arc;

/// A model bound to the family its id resolved to.
#[derive(Debug, Clone)]
pub enum BedrockModel {
    Text(FoundationModel<TextFamily>),
    Image(ImageModel<ImageFamily>),
    Embedding(EmbeddingModel<EmbeddingFamily>),
}

impl BedrockModel {
    pub fn model_id(&self) -> &str {
        match self {
            Self::Text(m) => m.model_id(),
            Self::Image(m) => m.model_id(),
            Self::Embedding(m) => m.model_id(),
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::Text(m) => m.family(),
            Self::Image(m) => m.family(),
            Self::Embedding(m) => m.family(),
        }
    }

    pub const fn modality(&self) -> Modality {
        match self {
            Self::Text(_) => Modality::Text,
            Self::Image(_) => Modality::Image,
            Self::Embedding(_) => Modality::Embedding,
        }
    }

    pub fn into_text(self) -> Result<FoundationModel<TextFamily>> {
        match self {
            Self::Text(model) => Ok(model),
            other => Err(other.mismatch(Modality::Text)),
        }
    }

    pub fn into_image(self) -> Result<ImageModel<ImageFamily>> {
        match self {
            Self::Image(model) => Ok(model),
            other => Err(other.mismatch(Modality::Image)),
        }
    }

    pub fn into_embedding(self) -> Result<EmbeddingModel<EmbeddingFamily>> {
        match self {
            Self::Embedding(model) => Ok(model),
            other => Err(other.mismatch(Modality::Embedding)),
        }
    }

    fn mismatch(&self, wanted: Modality) -> FmError {
        FmError::UnsupportedModel(format!(
            "{}: {} model, {wanted} model requested",
            self.model_id(),
            self.modality()
        ))
    }
}

/// Resolve `model_id` and bind it to `transport`.
///
/// Inference profile ids keep their prefix: the profile id is what gets invoked.
pub fn from_model_id(
    model_id: impl Into<String>,
    transport: Arc<dyn BedrockTransport>,
) -> Result<BedrockModel> {
    let model_id = model_id.into();
    Ok(match resolve(&model_id)? {
        Family::Text(family) => BedrockModel::Text(FoundationModel::new(model_id, family, transport)),
        Family::Image(family) => BedrockModel::Image(ImageModel::new(model_id, family, transport)),
        Family::Embedding(family) => {
            BedrockModel::Embedding(EmbeddingModel::new(model_id, family, transport))
        }
    })
}

pub fn text_model(
    model_id: impl Into<String>,
    transport: Arc<dyn BedrockTransport>,
) -> Result<FoundationModel<TextFamily>> {
    from_model_id(model_id, transport)?.into_text()
}

pub fn image_model(
    model_id: impl Into<String>,
    transport: Arc<dyn BedrockTransport>,
) -> Result<ImageModel<ImageFamily>> {
    from_model_id(model_id, transport)?.into_image()
}

pub fn embedding_model(
    model_id: impl Into<String>,
    transport: Arc<dyn BedrockTransport>,
) -> Result<EmbeddingModel<EmbeddingFamily>> {
    from_model_id(model_id, transport)?.into_embedding()
}
