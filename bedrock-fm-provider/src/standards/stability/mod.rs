//! Stability AI families.

mod sdxl;

pub use sdxl::StableDiffusion;
