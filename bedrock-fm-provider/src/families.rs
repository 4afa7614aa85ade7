//! Closed family enums.
//!
//! Each enum wraps the per-family transcoder structs and implements the
//! matching transcoder trait by delegating through a single `match`, so the
//! engines stay statically dispatched and the family set is exhaustive.

use crate::error::Result;
use crate::params::{EffectiveParams, FamilyDefaults};
use crate::standards::ai21::{Jamba, Jurassic};
use crate::standards::amazon::{Titan, TitanEmbed, TitanImage};
use crate::standards::anthropic::{Claude, Claude3};
use crate::standards::cohere::{CohereEmbed, Command, CommandR};
use crate::standards::meta::{Llama2Chat, Llama3Instruct};
use crate::standards::mistral::{Mistral, MistralLarge};
use crate::standards::stability::StableDiffusion;
use crate::transcoder::{
    Chunk, EmbeddingTranscoder, ImageTranscoder, RenderedPrompt, TextTranscoder,
};
use crate::types::{Embedding, EmbeddingKind, ExtraArgs, Image, ImageRequest, Turn};
use serde_json::Value;

/// Expand `$body` once per variant with `$inner` bound to the wrapped transcoder.
macro_rules! dispatch {
    ($family:ident :: { $($variant:ident),+ $(,)? }, $value:expr, $inner:ident => $body:expr) => {
        match $value {
            $( $family::$variant($inner) => $body, )+
        }
    };
}

macro_rules! text_dispatch {
    ($value:expr, $inner:ident => $body:expr) => {
        dispatch!(
            TextFamily::{
                Titan, Claude, Claude3, Jurassic, Jamba, Command, CommandR, Llama2, Llama3,
                Mistral, MistralLarge,
            },
            $value,
            $inner => $body
        )
    };
}

/// Every text model family.
#[derive(Debug, Clone, Copy)]
pub enum TextFamily {
    Titan(Titan),
    Claude(Claude),
    Claude3(Claude3),
    Jurassic(Jurassic),
    Jamba(Jamba),
    Command(Command),
    CommandR(CommandR),
    Llama2(Llama2Chat),
    Llama3(Llama3Instruct),
    Mistral(Mistral),
    MistralLarge(MistralLarge),
}

impl TextFamily {
    /// All text families, one entry per family tag.
    pub const ALL: [TextFamily; 12] = [
        Self::Titan(Titan),
        Self::Claude(Claude),
        Self::Claude3(Claude3),
        Self::Jurassic(Jurassic),
        Self::Jamba(Jamba),
        Self::Command(Command),
        Self::CommandR(CommandR),
        Self::Llama2(Llama2Chat),
        Self::Llama3(Llama3Instruct),
        Self::Mistral(Mistral::mistral()),
        Self::Mistral(Mistral::mixtral()),
        Self::MistralLarge(MistralLarge),
    ];
}

impl TextTranscoder for TextFamily {
    fn family(&self) -> &'static str {
        text_dispatch!(self, t => t.family())
    }

    fn supported_extra_args(&self) -> &'static [&'static str] {
        text_dispatch!(self, t => t.supported_extra_args())
    }

    fn validate_extra_args(&self, args: &ExtraArgs) -> Result<()> {
        text_dispatch!(self, t => t.validate_extra_args(args))
    }

    fn supports_generate(&self) -> bool {
        text_dispatch!(self, t => t.supports_generate())
    }

    fn supports_streaming(&self) -> bool {
        text_dispatch!(self, t => t.supports_streaming())
    }

    fn family_defaults(&self) -> FamilyDefaults {
        text_dispatch!(self, t => t.family_defaults())
    }

    fn text_prompt(&self, prompt: &str) -> Result<RenderedPrompt> {
        text_dispatch!(self, t => t.text_prompt(prompt))
    }

    fn render_prompt(&self, conversation: &[Turn]) -> Result<RenderedPrompt> {
        text_dispatch!(self, t => t.render_prompt(conversation))
    }

    fn build_body(
        &self,
        prompt: &RenderedPrompt,
        params: &EffectiveParams,
        stream: bool,
    ) -> Result<Value> {
        text_dispatch!(self, t => t.build_body(prompt, params, stream))
    }

    fn decode_response(&self, body: &Value) -> Result<Vec<String>> {
        text_dispatch!(self, t => t.decode_response(body))
    }

    fn decode_chunk(&self, chunk: &Value) -> Result<Chunk> {
        text_dispatch!(self, t => t.decode_chunk(chunk))
    }
}

/// Every image model family.
#[derive(Debug, Clone, Copy)]
pub enum ImageFamily {
    TitanImage(TitanImage),
    StableDiffusion(StableDiffusion),
}

impl ImageFamily {
    pub const ALL: [ImageFamily; 2] = [
        Self::TitanImage(TitanImage),
        Self::StableDiffusion(StableDiffusion),
    ];
}

impl ImageTranscoder for ImageFamily {
    fn family(&self) -> &'static str {
        dispatch!(ImageFamily::{TitanImage, StableDiffusion}, self, t => t.family())
    }

    fn build_body(&self, request: &ImageRequest) -> Result<Value> {
        dispatch!(ImageFamily::{TitanImage, StableDiffusion}, self, t => t.build_body(request))
    }

    fn decode_images(&self, body: &Value) -> Result<Vec<Image>> {
        dispatch!(ImageFamily::{TitanImage, StableDiffusion}, self, t => t.decode_images(body))
    }
}

/// Every embedding model family.
#[derive(Debug, Clone, Copy)]
pub enum EmbeddingFamily {
    TitanEmbed(TitanEmbed),
    CohereEmbed(CohereEmbed),
}

impl EmbeddingFamily {
    pub const ALL: [EmbeddingFamily; 2] = [
        Self::TitanEmbed(TitanEmbed),
        Self::CohereEmbed(CohereEmbed),
    ];
}

impl EmbeddingTranscoder for EmbeddingFamily {
    fn family(&self) -> &'static str {
        dispatch!(EmbeddingFamily::{TitanEmbed, CohereEmbed}, self, t => t.family())
    }

    fn max_batch_size(&self) -> Option<usize> {
        dispatch!(EmbeddingFamily::{TitanEmbed, CohereEmbed}, self, t => t.max_batch_size())
    }

    fn build_body(&self, texts: &[String], kind: EmbeddingKind) -> Result<Value> {
        dispatch!(EmbeddingFamily::{TitanEmbed, CohereEmbed}, self, t => t.build_body(texts, kind))
    }

    fn decode_embeddings(&self, body: &Value) -> Result<Vec<Embedding>> {
        dispatch!(EmbeddingFamily::{TitanEmbed, CohereEmbed}, self, t => t.decode_embeddings(body))
    }
}
