//! Amazon Titan families: text, image and embeddings.

mod embed;
mod image;
mod text;

pub use embed::TitanEmbed;
pub use image::TitanImage;
pub use text::Titan;
