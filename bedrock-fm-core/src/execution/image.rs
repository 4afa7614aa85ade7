//! Image invocation engine.

use crate::error::Result;
use crate::execution::http::BedrockTransport;
use crate::transcoder::ImageTranscoder;
use crate::types::{Image, ImageRequest};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// An image model bound to its family transcoder and a transport.
#[derive(Clone)]
pub struct ImageModel<T> {
    model_id: String,
    transcoder: T,
    transport: Arc<dyn BedrockTransport>,
}

impl<T: ImageTranscoder> std::fmt::Debug for ImageModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageModel")
            .field("model_id", &self.model_id)
            .field("family", &self.transcoder.family())
            .finish_non_exhaustive()
    }
}

impl<T: ImageTranscoder> ImageModel<T> {
    pub fn new(
        model_id: impl Into<String>,
        transcoder: T,
        transport: Arc<dyn BedrockTransport>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            transcoder,
            transport,
        }
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

    /// The exact body `generate` would send.
    pub fn prepare(&self, request: &ImageRequest) -> Result<String> {
        Ok(serde_json::to_string(&self.transcoder.build_body(request)?)?)
    }

    /// Generate (or edit) images. Parameter combinations are validated before
    /// any network activity.
    pub async fn generate(&self, request: &ImageRequest) -> Result<Vec<Image>> {
        let body = self.prepare(request)?;

        let started = Instant::now();
        let raw = self
            .transport
            .invoke(&self.model_id, Bytes::from(body))
            .await?;
        let latency = started.elapsed();

        let response: Value = serde_json::from_slice(&raw)?;
        let images = self.transcoder.decode_images(&response)?;
        tracing::debug!(
            target: "bedrock_fm::invoke",
            model_id = %self.model_id,
            family = self.transcoder.family(),
            task = request.task.task_type(),
            latency_ms = latency.as_millis() as u64,
            images = images.len(),
            "image invocation completed"
        );
        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FmError;
    use crate::test_support::MockTransport;
    use crate::utils::json::required_array;
    use serde_json::json;

    struct Plain;

    impl ImageTranscoder for Plain {
        fn family(&self) -> &'static str {
            "test.image"
        }

        fn build_body(&self, request: &ImageRequest) -> Result<Value> {
            if request.number_of_images == Some(0) {
                return Err(FmError::MissingRequiredParameter("number_of_images".into()));
            }
            Ok(json!({"prompt": request.primary_text()}))
        }

        fn decode_images(&self, body: &Value) -> Result<Vec<Image>> {
            required_array(body, "/images", "test image")?
                .iter()
                .map(|v| Image::from_base64(v.as_str().unwrap_or_default()))
                .collect()
        }
    }

    #[tokio::test]
    async fn decodes_base64_images() {
        let png = Image::blank(2, 3).unwrap();
        let transport = Arc::new(MockTransport::responding(
            json!({"images": [png.to_base64()]}),
        ));
        let model = ImageModel::new("test.image-v1", Plain, transport.clone());

        let images = model.generate(&ImageRequest::new("a cat")).await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dimensions(), (2, 3));
        assert_eq!(transport.requests()[0].body, r#"{"prompt":"a cat"}"#);
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_transport() {
        let transport = Arc::new(MockTransport::responding(json!({"images": []})));
        let model = ImageModel::new("test.image-v1", Plain, transport.clone());

        let err = model
            .generate(&ImageRequest::new("a cat").with_number_of_images(0))
            .await
            .unwrap_err();
        assert!(matches!(err, FmError::MissingRequiredParameter(_)));
        assert!(transport.requests().is_empty());
    }
}
