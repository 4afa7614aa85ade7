//! Stable Diffusion XL (`stability.stable-diffusion-xl-*`).
//!
//! Text-to-image only. Weighted prompts map to `text_prompts`; a negative
//! prompt is sent as an extra prompt with weight `-1`. `clip_guidance_preset`
//! and `cfg_scale` are always sent, defaulting to `NONE` and 7.

use crate::defaults;
use crate::error::{FmError, Result};
use crate::transcoder::ImageTranscoder;
use crate::types::{ClipGuidancePreset, Image, ImageRequest, ImageTask, json_number};
use crate::utils::json::{required_array, required_str};
use serde_json::{Map, Value, json};

pub const FAMILY: &str = "stability.stable";

#[derive(Debug, Clone, Copy, Default)]
pub struct StableDiffusion;

impl StableDiffusion {
    fn check_fields(request: &ImageRequest) -> Result<()> {
        if !matches!(request.task, ImageTask::TextToImage { condition: None }) {
            return Err(FmError::not_supported(FAMILY, request.task.task_type()));
        }
        if request.prompts.is_empty() {
            return Err(FmError::MissingRequiredParameter("text_prompts".into()));
        }
        if request.quality.is_some() {
            return Err(FmError::unsupported_argument(FAMILY, ["quality"]));
        }
        let samples = request.number_of_images.unwrap_or(1);
        if samples != 1 {
            return Err(FmError::UnsupportedBatchSize {
                family: FAMILY.to_string(),
                size: samples as usize,
                max: 1,
            });
        }
        Ok(())
    }
}

impl ImageTranscoder for StableDiffusion {
    fn family(&self) -> &'static str {
        FAMILY
    }

    fn build_body(&self, request: &ImageRequest) -> Result<Value> {
        Self::check_fields(request)?;

        let mut text_prompts: Vec<Value> = request
            .prompts
            .iter()
            .map(|p| json!({"text": p.text, "weight": json_number(p.weight)}))
            .collect();
        if let Some(negative) = &request.negative_prompt {
            text_prompts.push(json!({"text": negative, "weight": -1}));
        }

        let mut body = Map::new();
        body.insert("text_prompts".into(), Value::Array(text_prompts));
        body.insert(
            "seed".into(),
            request.seed.unwrap_or(defaults::image::SEED).into(),
        );
        body.insert("samples".into(), Value::from(1u32));
        body.insert(
            "sampler_name".into(),
            request.sampler.clone().map_or(Value::Null, Value::from),
        );
        body.insert(
            "steps".into(),
            request.steps.unwrap_or(defaults::image::STEPS).into(),
        );
        body.insert(
            "width".into(),
            request.width.unwrap_or(defaults::image::WIDTH).into(),
        );
        body.insert(
            "height".into(),
            request.height.unwrap_or(defaults::image::HEIGHT).into(),
        );
        body.insert(
            "clip_guidance_preset".into(),
            request
                .clip_guidance_preset
                .unwrap_or(ClipGuidancePreset::None)
                .as_str()
                .into(),
        );
        if let Some(preset) = request.style_preset {
            body.insert("style_preset".into(), preset.as_str().into());
        }
        body.insert(
            "cfg_scale".into(),
            json_number(request.cfg_scale.unwrap_or(defaults::image::CFG_SCALE)),
        );
        Ok(Value::Object(body))
    }

    fn decode_images(&self, body: &Value) -> Result<Vec<Image>> {
        required_array(body, "/artifacts", FAMILY)?
            .iter()
            .map(|artifact| Image::from_base64(required_str(artifact, "/base64", FAMILY)?))
            .collect()
    }
}
