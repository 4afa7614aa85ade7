//! Image generation requests.
//!
//! One request type covers both image families. Task variants other than
//! `TextToImage` are Titan-only, and the Stable Diffusion knobs (`sampler`,
//! `steps`, `style_preset`, `clip_guidance_preset`) are SDXL-only; each
//! transcoder rejects what it cannot express.

use super::image::Image;

/// A text prompt with its relative weight (SDXL honours weights, Titan uses the first prompt).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPrompt {
    pub text: String,
    pub weight: f64,
}

impl WeightedPrompt {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

impl From<&str> for WeightedPrompt {
    fn from(text: &str) -> Self {
        Self::new(text, 1.0)
    }
}

impl From<String> for WeightedPrompt {
    fn from(text: String) -> Self {
        Self::new(text, 1.0)
    }
}

impl<S: Into<String>> From<(S, f64)> for WeightedPrompt {
    fn from((text, weight): (S, f64)) -> Self {
        Self::new(text, weight)
    }
}

/// How a condition image steers Titan generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlMode {
    CannyEdge,
    Segmentation,
}

impl ControlMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CannyEdge => "CANNY_EDGE",
            Self::Segmentation => "SEGMENTATION",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutpaintingMode {
    Default,
    Precise,
}

impl OutpaintingMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Precise => "PRECISE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageQuality {
    Standard,
    Premium,
}

impl ImageQuality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

/// Stable Diffusion style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    ThreeDModel,
    AnalogFilm,
    Anime,
    Cinematic,
    ComicBook,
    DigitalArt,
    Enhance,
    FantasyArt,
    Isometric,
    LineArt,
    LowPoly,
    ModelingCompound,
    NeonPunk,
    Origami,
    Photographic,
    PixelArt,
    TileTexture,
}

impl StylePreset {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeDModel => "3d-model",
            Self::AnalogFilm => "analog-film",
            Self::Anime => "anime",
            Self::Cinematic => "cinematic",
            Self::ComicBook => "comic-book",
            Self::DigitalArt => "digital-art",
            Self::Enhance => "enhance",
            Self::FantasyArt => "fantasy-art",
            Self::Isometric => "isometric",
            Self::LineArt => "line-art",
            Self::LowPoly => "low-poly",
            Self::ModelingCompound => "modeling-compound",
            Self::NeonPunk => "neon-punk",
            Self::Origami => "origami",
            Self::Photographic => "photographic",
            Self::PixelArt => "pixel-art",
            Self::TileTexture => "tile-texture",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipGuidancePreset {
    None,
    FastBlue,
    FastGreen,
    Simple,
    Slow,
    Slower,
    Slowest,
}

impl ClipGuidancePreset {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::FastBlue => "FAST_BLUE",
            Self::FastGreen => "FAST_GREEN",
            Self::Simple => "SIMPLE",
            Self::Slow => "SLOW",
            Self::Slower => "SLOWER",
            Self::Slowest => "SLOWEST",
        }
    }
}

/// Conditioned text-to-image: the layout of `image` guides the result.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCondition {
    pub image: Image,
    pub control_mode: ControlMode,
    pub control_strength: Option<f64>,
}

/// What the image model should do.
///
/// Masked edits take exactly one of `mask_prompt` or `mask_image`; supplying
/// both or neither is rejected before any request is sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageTask {
    TextToImage {
        condition: Option<ImageCondition>,
    },
    Variation {
        images: Vec<Image>,
        similarity_strength: Option<f64>,
    },
    Inpainting {
        image: Image,
        mask_prompt: Option<String>,
        mask_image: Option<Image>,
    },
    Outpainting {
        image: Image,
        mask_prompt: Option<String>,
        mask_image: Option<Image>,
        mode: Option<OutpaintingMode>,
    },
    ColorGuided {
        colors: Vec<String>,
        reference_image: Option<Image>,
    },
    BackgroundRemoval {
        image: Image,
    },
}

impl ImageTask {
    /// The Titan `taskType` discriminator.
    pub const fn task_type(&self) -> &'static str {
        match self {
            Self::TextToImage { .. } => "TEXT_IMAGE",
            Self::Variation { .. } => "IMAGE_VARIATION",
            Self::Inpainting { .. } => "INPAINTING",
            Self::Outpainting { .. } => "OUTPAINTING",
            Self::ColorGuided { .. } => "COLOR_GUIDED_GENERATION",
            Self::BackgroundRemoval { .. } => "BACKGROUND_REMOVAL",
        }
    }

    pub fn inpaint_prompt(image: Image, mask_prompt: impl Into<String>) -> Self {
        Self::Inpainting {
            image,
            mask_prompt: Some(mask_prompt.into()),
            mask_image: None,
        }
    }

    pub fn inpaint_mask(image: Image, mask_image: Image) -> Self {
        Self::Inpainting {
            image,
            mask_prompt: None,
            mask_image: Some(mask_image),
        }
    }

    pub fn outpaint_prompt(image: Image, mask_prompt: impl Into<String>) -> Self {
        Self::Outpainting {
            image,
            mask_prompt: Some(mask_prompt.into()),
            mask_image: None,
            mode: None,
        }
    }

    pub fn outpaint_mask(image: Image, mask_image: Image) -> Self {
        Self::Outpainting {
            image,
            mask_prompt: None,
            mask_image: Some(mask_image),
            mode: None,
        }
    }
}

impl Default for ImageTask {
    fn default() -> Self {
        Self::TextToImage { condition: None }
    }
}

/// A single image-model invocation. Unset numeric fields fall back to family defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageRequest {
    pub prompts: Vec<WeightedPrompt>,
    pub negative_prompt: Option<String>,
    pub task: ImageTask,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub seed: Option<u64>,
    pub cfg_scale: Option<f64>,
    pub number_of_images: Option<u32>,
    pub quality: Option<ImageQuality>,
    pub sampler: Option<String>,
    pub steps: Option<u32>,
    pub style_preset: Option<StylePreset>,
    pub clip_guidance_preset: Option<ClipGuidancePreset>,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<WeightedPrompt>) -> Self {
        Self {
            prompts: vec![prompt.into()],
            ..Self::default()
        }
    }

    /// Text-to-image from several weighted prompts.
    pub fn weighted<I, P>(prompts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<WeightedPrompt>,
    {
        Self {
            prompts: prompts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_task(mut self, task: ImageTask) -> Self {
        self.task = task;
        self
    }

    pub fn with_negative_prompt(mut self, negative: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cfg_scale(mut self, cfg_scale: f64) -> Self {
        self.cfg_scale = Some(cfg_scale);
        self
    }

    pub fn with_number_of_images(mut self, count: u32) -> Self {
        self.number_of_images = Some(count);
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_style_preset(mut self, preset: StylePreset) -> Self {
        self.style_preset = Some(preset);
        self
    }

    pub fn with_clip_guidance_preset(mut self, preset: ClipGuidancePreset) -> Self {
        self.clip_guidance_preset = Some(preset);
        self
    }

    /// Text of the first prompt, or an empty string when there is none.
    pub fn primary_text(&self) -> &str {
        self.prompts.first().map(|p| p.text.as_str()).unwrap_or_default()
    }
}
