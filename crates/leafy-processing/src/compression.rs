use bytes::Bytes;
use image::DynamicImage;

use leafy_core::constants::{NORMALIZED_EXTENSION, NORMALIZED_MIME_TYPE};

use crate::image::NormalizeError;

/// Convert a 0.0-1.0 quality factor to the encoder's 1-100 scale.
pub fn quality_to_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Lossy re-encoder used by the normalizer.
///
/// Implementations must be deterministic for a given image and quality; the
/// normalizer relies on that to decide whether a second pass is needed.
pub trait LossyEncoder: Send + Sync {
    /// Encode `img` at `quality` (0.0 - 1.0).
    fn encode(&self, img: &DynamicImage, quality: f32) -> Result<Bytes, NormalizeError>;

    fn mime_type(&self) -> &'static str;

    /// File extension without the dot
    fn extension(&self) -> &'static str;
}

/// Baseline JPEG via the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegEncoder;

impl LossyEncoder for JpegEncoder {
    fn encode(&self, img: &DynamicImage, quality: f32) -> Result<Bytes, NormalizeError> {
        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut buffer = Vec::with_capacity(width as usize * height as usize / 4);
        {
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buffer,
                quality_to_percent(quality),
            );
            encoder
                .encode_image(&rgb)
                .map_err(|e| NormalizeError::Encode(e.to_string()))?;
        }

        if buffer.is_empty() {
            return Err(NormalizeError::Encode("encoder produced no output".to_string()));
        }

        Ok(Bytes::from(buffer))
    }

    fn mime_type(&self) -> &'static str {
        NORMALIZED_MIME_TYPE
    }

    fn extension(&self) -> &'static str {
        NORMALIZED_EXTENSION
    }
}
