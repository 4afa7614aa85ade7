//! Titan Image Generator (`amazon.titan-image-*`).
//!
//! Every task shares one body layout:
//!
//! ```json
//! {"taskType": "...", "<task>Params": {...}, "imageGenerationConfig": {...}}
//! ```

use crate::defaults;
use crate::error::{FmError, Result};
use crate::transcoder::ImageTranscoder;
use crate::types::{Image, ImageRequest, ImageTask, json_number};
use crate::utils::json::required_array;
use serde_json::{Map, Value};

pub const FAMILY: &str = "amazon.titan-image";

#[derive(Debug, Clone, Copy, Default)]
pub struct TitanImage;

impl TitanImage {
    /// Reject request fields that only apply to Stable Diffusion.
    fn check_fields(request: &ImageRequest) -> Result<()> {
        let mut offending = Vec::new();
        if request.prompts.len() > 1 {
            offending.push("prompts");
        }
        if request.sampler.is_some() {
            offending.push("sampler");
        }
        if request.steps.is_some() {
            offending.push("steps");
        }
        if request.style_preset.is_some() {
            offending.push("style_preset");
        }
        if request.clip_guidance_preset.is_some() {
            offending.push("clip_guidance_preset");
        }
        if offending.is_empty() {
            Ok(())
        } else {
            Err(FmError::unsupported_argument(FAMILY, offending))
        }
    }

    fn task_params(request: &ImageRequest) -> Result<(&'static str, Map<String, Value>)> {
        let text = request.primary_text();
        let mut params = Map::new();
        let key = match &request.task {
            ImageTask::TextToImage { condition } => {
                require_text(text)?;
                put_prompts(&mut params, text, request);
                if let Some(condition) = condition {
                    params.insert("conditionImage".into(), condition.image.to_base64().into());
                    params.insert(
                        "controlMode".into(),
                        condition.control_mode.as_str().into(),
                    );
                    if let Some(strength) = condition.control_strength {
                        params.insert("controlStrength".into(), json_number(strength));
                    }
                }
                "textToImageParams"
            }
            ImageTask::Variation {
                images,
                similarity_strength,
            } => {
                if images.is_empty() {
                    return Err(FmError::MissingRequiredParameter("images".into()));
                }
                put_prompts(&mut params, text, request);
                params.insert(
                    "images".into(),
                    images.iter().map(|i| Value::from(i.to_base64())).collect(),
                );
                if let Some(strength) = similarity_strength {
                    params.insert("similarityStrength".into(), json_number(*strength));
                }
                "imageVariationParams"
            }
            ImageTask::Inpainting {
                image,
                mask_prompt,
                mask_image,
            } => {
                put_prompts(&mut params, text, request);
                params.insert("image".into(), image.to_base64().into());
                put_mask(&mut params, mask_prompt.as_deref(), mask_image.as_ref())?;
                "inPaintingParams"
            }
            ImageTask::Outpainting {
                image,
                mask_prompt,
                mask_image,
                mode,
            } => {
                put_prompts(&mut params, text, request);
                params.insert("image".into(), image.to_base64().into());
                put_mask(&mut params, mask_prompt.as_deref(), mask_image.as_ref())?;
                if let Some(mode) = mode {
                    params.insert("outPaintingMode".into(), mode.as_str().into());
                }
                "outPaintingParams"
            }
            ImageTask::ColorGuided {
                colors,
                reference_image,
            } => {
                require_text(text)?;
                if colors.is_empty() {
                    return Err(FmError::MissingRequiredParameter("colors".into()));
                }
                put_prompts(&mut params, text, request);
                params.insert("colors".into(), colors.clone().into());
                if let Some(reference) = reference_image {
                    params.insert("referenceImage".into(), reference.to_base64().into());
                }
                "colorGuidedGenerationParams"
            }
            ImageTask::BackgroundRemoval { image } => {
                params.insert("image".into(), image.to_base64().into());
                "backgroundRemovalParams"
            }
        };
        Ok((key, params))
    }

    fn generation_config(request: &ImageRequest) -> Map<String, Value> {
        let mut config = Map::new();
        config.insert(
            "seed".into(),
            request.seed.unwrap_or(defaults::image::SEED).into(),
        );
        config.insert(
            "cfgScale".into(),
            json_number(request.cfg_scale.unwrap_or(defaults::image::CFG_SCALE)),
        );
        if !matches!(request.task, ImageTask::BackgroundRemoval { .. }) {
            config.insert(
                "numberOfImages".into(),
                request
                    .number_of_images
                    .unwrap_or(defaults::image::NUMBER_OF_IMAGES)
                    .into(),
            );
        }
        config.insert(
            "height".into(),
            request.height.unwrap_or(defaults::image::HEIGHT).into(),
        );
        config.insert(
            "width".into(),
            request.width.unwrap_or(defaults::image::WIDTH).into(),
        );
        if let Some(quality) = request.quality {
            config.insert("quality".into(), quality.as_str().into());
        }
        config
    }
}

fn require_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(FmError::MissingRequiredParameter("text".into()));
    }
    Ok(())
}

fn put_prompts(params: &mut Map<String, Value>, text: &str, request: &ImageRequest) {
    if !text.is_empty() {
        params.insert("text".into(), text.into());
    }
    if let Some(negative) = &request.negative_prompt {
        params.insert("negativeText".into(), negative.as_str().into());
    }
}

/// Masked edits take exactly one of a mask prompt or a mask image.
fn put_mask(
    params: &mut Map<String, Value>,
    mask_prompt: Option<&str>,
    mask_image: Option<&Image>,
) -> Result<()> {
    match (mask_prompt, mask_image) {
        (Some(prompt), None) => {
            params.insert("maskPrompt".into(), prompt.into());
            Ok(())
        }
        (None, Some(mask)) => {
            params.insert("maskImage".into(), mask.to_base64().into());
            Ok(())
        }
        (Some(_), Some(_)) => Err(FmError::MissingRequiredParameter(
            "exactly one of mask_prompt or mask_image, not both".into(),
        )),
        (None, None) => Err(FmError::MissingRequiredParameter(
            "one of mask_prompt or mask_image".into(),
        )),
    }
}

impl ImageTranscoder for TitanImage {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn build_body(&self, request: &ImageRequest) -> Result<Value> {
        Self::check_fields(request)?;
        let (params_key, params) = Self::task_params(request)?;

        let mut body = Map::new();
        body.insert("taskType".into(), request.task.task_type().into());
        body.insert(params_key.into(), Value::Object(params));
        body.insert(
            "imageGenerationConfig".into(),
            Value::Object(Self::generation_config(request)),
        );
        Ok(Value::Object(body))
    }

    fn decode_images(&self, body: &Value) -> Result<Vec<Image>> {
        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(FmError::ApiError {
                code: 400,
                message: error.to_string(),
                details: Some(body.clone()),
            });
        }
        required_array(body, "/images", FAMILY)?
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| FmError::parse(format!("{FAMILY}: image is not a string")))
                    .and_then(Image::from_base64)
            })
            .collect()
    }
}
