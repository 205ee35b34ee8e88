//! Image decoding, resizing and JPEG re-encoding.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbImage};
use rusty_media_common::{
    DEFAULT_OPERATION_CONCURRENCY, DEFAULT_THUMBNAIL_MAX_DIMENSION, DEFAULT_THUMBNAIL_QUALITY,
};
use serde::{Deserialize, Serialize};

use crate::error::ThumbnailError;

/// Configuration for thumbnail generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailSettings {
    /// Bounding box edge in pixels; thumbnails fit within it.
    pub max_dimension: u32,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Maximum records handled concurrently per batch.
    pub max_concurrency: usize,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_THUMBNAIL_MAX_DIMENSION,
            jpeg_quality: DEFAULT_THUMBNAIL_QUALITY,
            max_concurrency: DEFAULT_OPERATION_CONCURRENCY,
        }
    }
}

impl ThumbnailSettings {
    /// Set the bounding box edge.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    /// Set the JPEG quality, clamped to 1-100.
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality.clamp(1, 100);
        self
    }

    /// Set batch concurrency.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}

/// An encoded thumbnail.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// JPEG bytes.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Turns source image bytes into a bounded JPEG.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailProcessor {
    max_dimension: u32,
    jpeg_quality: u8,
}

impl Default for ThumbnailProcessor {
    fn default() -> Self {
        Self::new(&ThumbnailSettings::default())
    }
}

impl ThumbnailProcessor {
    /// Create a processor from settings.
    pub fn new(settings: &ThumbnailSettings) -> Self {
        Self {
            max_dimension: settings.max_dimension.max(1),
            jpeg_quality: settings.jpeg_quality.clamp(1, 100),
        }
    }

    /// Decode, fit within the bounding box and encode as JPEG.
    ///
    /// Aspect ratio is preserved and images already inside the box are not
    /// upscaled. Transparency is flattened since JPEG has no alpha channel.
    ///
    /// # Arguments
    /// * `data` - Source image bytes (any enabled format)
    ///
    /// # Errors
    /// `ThumbnailError::Image` when the bytes cannot be decoded or encoded.
    pub fn process(&self, data: &[u8]) -> Result<Thumbnail, ThumbnailError> {
        let source: DynamicImage = image::load_from_memory(data)?;

        let fitted: DynamicImage =
            if source.width() > self.max_dimension || source.height() > self.max_dimension {
                source.thumbnail(self.max_dimension, self.max_dimension)
            } else {
                source
            };

        let rgb: RgbImage = fitted.to_rgb8();
        let mut encoded: Vec<u8> = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.jpeg_quality).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )?;

        Ok(Thumbnail {
            data: encoded,
            width: rgb.width(),
            height: rgb.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 128]));
        let mut buf: Vec<u8> = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_landscape_fits_box() {
        let thumb: Thumbnail = ThumbnailProcessor::default().process(&png(900, 600)).unwrap();

        assert_eq!((thumb.width, thumb.height), (300, 200));
        let decoded = image::load_from_memory_with_format(&thumb.data, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (300, 200));
    }

    #[test]
    fn test_portrait_fits_box() {
        let processor = ThumbnailProcessor::new(&ThumbnailSettings::default().with_max_dimension(50));
        let thumb: Thumbnail = processor.process(&png(100, 400)).unwrap();
        assert_eq!(thumb.height, 50);
        assert!(thumb.width <= 13 && thumb.width >= 12);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let thumb: Thumbnail = ThumbnailProcessor::default().process(&png(40, 30)).unwrap();
        assert_eq!((thumb.width, thumb.height), (40, 30));
    }

    #[test]
    fn test_garbage_is_image_error() {
        let result = ThumbnailProcessor::default().process(b"definitely not an image");
        assert!(matches!(result, Err(ThumbnailError::Image(_))));
    }

    #[test]
    fn test_settings_are_clamped() {
        let settings = ThumbnailSettings::default()
            .with_jpeg_quality(0)
            .with_max_dimension(0)
            .with_max_concurrency(0);
        assert_eq!(settings.jpeg_quality, 1);
        assert_eq!(settings.max_dimension, 1);
        assert_eq!(settings.max_concurrency, 1);
    }
}
