//! PNG-backed image handle.

use crate::error::{FmError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use std::io::Cursor;

/// An image as exchanged with Bedrock: PNG bytes plus the decoded dimensions.
///
/// The payload is a `Bytes` handle, so clones share the same buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    png: Bytes,
    width: u32,
    height: u32,
}

impl Image {
    /// Load an image from any supported encoding. Non-PNG input is re-encoded as PNG.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let decoded = image::load_from_memory(&data)?;
        let (width, height) = (decoded.width(), decoded.height());
        let png = if image::guess_format(&data)? == ImageFormat::Png {
            data
        } else {
            encode_png(&decoded)?
        };
        Ok(Self { png, width, height })
    }

    /// Decode a base64 image payload, as found in Bedrock image responses.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let raw = STANDARD.decode(encoded.trim())?;
        Self::from_bytes(raw)
    }

    pub fn from_dynamic(image: &DynamicImage) -> Result<Self> {
        Ok(Self {
            png: encode_png(image)?,
            width: image.width(),
            height: image.height(),
        })
    }

    /// A black RGB image of the given size.
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        Self::from_dynamic(&DynamicImage::new_rgb8(width, height))
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn png_bytes(&self) -> &Bytes {
        &self.png
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }

    pub fn to_dynamic(&self) -> Result<DynamicImage> {
        image::load_from_memory_with_format(&self.png, ImageFormat::Png).map_err(FmError::from)
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_len", &self.png.len())
            .finish()
    }
}

fn encode_png(image: &DynamicImage) -> Result<Bytes> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageOutputFormat::Png)?;
    Ok(Bytes::from(buffer))
}
