//! JPEG export format

use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageEncoder, RgbImage};

use duaa_core::error::{ExportError, Result};

use crate::Exporter;

/// JPEG exporter; quality is clamped to 1..=100
#[derive(Debug, Clone, Copy)]
pub struct JpegExporter {
    quality: u8,
}

impl JpegExporter {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegExporter {
    fn default() -> Self {
        Self::new(95)
    }
}

impl Exporter for JpegExporter {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn export(&self, image: &RgbImage) -> Result<Vec<u8>> {
        let mut jpeg_data = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg_data, self.quality)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)
            .map_err(|e| ExportError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;
        Ok(jpeg_data)
    }

    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn mime_type(&self) -> &'static str {
        "image/jpeg"
    }
}
