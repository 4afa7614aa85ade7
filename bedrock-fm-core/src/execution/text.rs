//! Text invocation engine.
//!
//! `generate` takes a single prompt string, `chat` a validated conversation.
//! Both come in four result shapes:
//!
//! | stream | details | operation | result |
//! |---|---|---|---|
//! | no | no | `generate` / `chat` | `Vec<String>` |
//! | no | yes | `*_detailed` | [`CompletionDetails`] |
//! | yes | no | `*_stream` | [`TextStream`] |
//! | yes | yes | `*_stream_detailed` | [`StreamDetails`] |
//!
//! [`FoundationModel::invoke`] selects the shape at runtime from an
//! [`InvocationMode`] and returns a tagged [`Invocation`].

use crate::error::{FmError, Result};
use crate::execution::http::BedrockTransport;
use crate::params::resolve_params;
use crate::streaming::text_stream;
use crate::transcoder::TextTranscoder;
use crate::types::{
    CompletionDetails, GenerationParams, Invocation, InvocationMode, PromptInput, StreamDetails,
    TextStream, Turn, validate_conversation,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// A text model bound to its family transcoder, a transport and instance defaults.
#[derive(Clone)]
pub struct FoundationModel<T> {
    model_id: String,
    transcoder: T,
    defaults: GenerationParams,
    transport: Arc<dyn BedrockTransport>,
}

impl<T: TextTranscoder> std::fmt::Debug for FoundationModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoundationModel")
            .field("model_id", &self.model_id)
            .field("family", &self.transcoder.family())
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<T> FoundationModel<T>
where
    T: TextTranscoder + Clone + 'static,
{
    pub fn new(
        model_id: impl Into<String>,
        transcoder: T,
        transport: Arc<dyn BedrockTransport>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            transcoder,
            defaults: GenerationParams::default(),
            transport,
        }
    }

    /// Set instance defaults. Invalid values and unsupported `extra_args` are
    /// rejected here rather than on the first call.
    pub fn with_defaults(mut self, defaults: GenerationParams) -> Result<Self> {
        defaults.validate()?;
        self.transcoder.validate_extra_args(&defaults.extra_args)?;
        self.defaults = defaults;
        Ok(self)
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn family(&self) -> &'static str {
        self.transcoder.family()
    }

    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    pub fn defaults(&self) -> &GenerationParams {
        &self.defaults
    }

    /// The exact body `generate` would send.
    pub fn prepare_generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
        stream: bool,
    ) -> Result<String> {
        self.prepare(&PromptInput::Text(prompt.to_string()), params, stream)
    }

    /// The exact body `chat` would send.
    pub fn prepare_chat(
        &self,
        conversation: &[Turn],
        params: &GenerationParams,
        stream: bool,
    ) -> Result<String> {
        self.prepare(&PromptInput::Conversation(conversation.to_vec()), params, stream)
    }

    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>> {
        Ok(self.generate_detailed(prompt, params).await?.output)
    }

    pub async fn generate_detailed(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<CompletionDetails> {
        self.complete(PromptInput::Text(prompt.to_string()), params)
            .await
    }

    pub async fn generate_stream(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<TextStream> {
        Ok(self.generate_stream_detailed(prompt, params).await?.stream)
    }

    pub async fn generate_stream_detailed(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<StreamDetails> {
        self.open_stream(PromptInput::Text(prompt.to_string()), params)
            .await
    }

    pub async fn chat(&self, conversation: &[Turn], params: &GenerationParams) -> Result<Vec<String>> {
        Ok(self.chat_detailed(conversation, params).await?.output)
    }

    pub async fn chat_detailed(
        &self,
        conversation: &[Turn],
        params: &GenerationParams,
    ) -> Result<CompletionDetails> {
        self.complete(PromptInput::Conversation(conversation.to_vec()), params)
            .await
    }

    pub async fn chat_stream(
        &self,
        conversation: &[Turn],
        params: &GenerationParams,
    ) -> Result<TextStream> {
        Ok(self.chat_stream_detailed(conversation, params).await?.stream)
    }

    pub async fn chat_stream_detailed(
        &self,
        conversation: &[Turn],
        params: &GenerationParams,
    ) -> Result<StreamDetails> {
        self.open_stream(PromptInput::Conversation(conversation.to_vec()), params)
            .await
    }

    /// Flag-driven entry point: `mode` picks one of the four result shapes.
    pub async fn invoke(
        &self,
        prompt: PromptInput,
        params: &GenerationParams,
        mode: InvocationMode,
    ) -> Result<Invocation> {
        Ok(match (mode.stream, mode.details) {
            (false, false) => Invocation::List(self.complete(prompt, params).await?.output),
            (false, true) => Invocation::Detailed(self.complete(prompt, params).await?),
            (true, false) => Invocation::Stream(self.open_stream(prompt, params).await?.stream),
            (true, true) => Invocation::DetailedStream(self.open_stream(prompt, params).await?),
        })
    }

    fn prepare(&self, prompt: &PromptInput, params: &GenerationParams, stream: bool) -> Result<String> {
        let family = self.transcoder.family();

        if stream && !self.transcoder.supports_streaming() {
            return Err(FmError::not_supported(family, "streaming"));
        }

        let rendered = match prompt {
            PromptInput::Text(text) => {
                if !self.transcoder.supports_generate() {
                    return Err(FmError::not_supported(family, "generate"));
                }
                self.transcoder.text_prompt(text)?
            }
            PromptInput::Conversation(turns) => {
                validate_conversation(turns)?;
                self.transcoder.render_prompt(turns)?
            }
        };

        params.validate()?;
        let effective = resolve_params(params, &self.defaults, &self.transcoder.family_defaults());
        self.transcoder.validate_extra_args(&effective.extra_args)?;

        let body = serde_json::to_string(&self.transcoder.build_body(&rendered, &effective, stream)?)?;
        tracing::trace!(target: "bedrock_fm::invoke", model_id = %self.model_id, %body, "request body");
        Ok(body)
    }

    async fn complete(&self, prompt: PromptInput, params: &GenerationParams) -> Result<CompletionDetails> {
        let body = self.prepare(&prompt, params, false)?;

        let started = Instant::now();
        let raw = self
            .transport
            .invoke(&self.model_id, Bytes::from(body.clone()))
            .await?;
        let latency = started.elapsed();

        let response: Value = serde_json::from_slice(&raw)?;
        let output = self.transcoder.decode_response(&response)?;
        tracing::debug!(
            target: "bedrock_fm::invoke",
            model_id = %self.model_id,
            family = self.transcoder.family(),
            stream = false,
            latency_ms = latency.as_millis() as u64,
            candidates = output.len(),
            "invocation completed"
        );

        Ok(CompletionDetails {
            output,
            body,
            latency,
            prompt,
            response,
        })
    }

    async fn open_stream(&self, prompt: PromptInput, params: &GenerationParams) -> Result<StreamDetails> {
        let body = self.prepare(&prompt, params, true)?;

        let started = Instant::now();
        let chunks = self
            .transport
            .invoke_streaming(&self.model_id, Bytes::from(body.clone()))
            .await?;
        let latency = started.elapsed();
        tracing::debug!(
            target: "bedrock_fm::invoke",
            model_id = %self.model_id,
            family = self.transcoder.family(),
            stream = true,
            latency_ms = latency.as_millis() as u64,
            "stream opened"
        );

        Ok(StreamDetails {
            stream: text_stream(self.transcoder.clone(), chunks),
            body,
            latency,
            prompt,
        })
    }
}
