//! Rendered chart wrapper and PNG export.
use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbImage};

use crate::error::ChartError;

/// Fixed file name for exported charts.
pub const EXPORT_FILE_NAME: &str = "budget_vs_regnskab.png";
/// MIME type of the exported encoding.
pub const EXPORT_MIME_TYPE: &str = "image/png";

/// A rendered chart held as an in-memory RGB pixel buffer.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pixels: RgbImage,
}

impl ChartImage {
    /// Wrap a raw row-major RGB buffer produced by the renderer.
    pub(crate) fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self, ChartError> {
        let pixels = RgbImage::from_raw(width, height, raw).ok_or_else(|| {
            ChartError::Render(format!(
                "pixel buffer does not match {}x{} RGB dimensions",
                width, height
            ))
        })?;
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The pixel data, three bytes per pixel.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Encode the image as PNG bytes (`image/png`).
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ChartError> {
        let mut bytes = Vec::new();
        let encoder = PngEncoder::new(&mut bytes);
        encoder.write_image(
            self.pixels.as_raw(),
            self.pixels.width(),
            self.pixels.height(),
            ColorType::Rgb8,
        )?;
        Ok(bytes)
    }

    /// Encode and write the image to `path`.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), ChartError> {
        let bytes = self.to_png_bytes()?;
        fs::write(&path, bytes).map_err(|e| {
            ChartError::Render(format!("failed to write {}: {}", path.as_ref().display(), e))
        })
    }
}
