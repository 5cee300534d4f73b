use std::sync::Arc;

use bytes::Bytes;
use image::{imageops::FilterType, DynamicImage};

use leafy_core::{NormalizeConfig, NormalizedPayload, PendingFile};

use super::resize::{center_square, scale_to_fit};
use super::NormalizeError;
use crate::compression::{JpegEncoder, LossyEncoder};

/// Replace the extension of `name` with `extension` (`photo.png` -> `photo.jpg`).
pub fn normalized_file_name(name: &str, extension: &str) -> String {
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    };
    format!("{}.{}", stem, extension)
}

/// Square image normalizer.
///
/// Every output is a centered square whose side is the shorter edge of the
/// image after scaling it to fit `max_dimension`, re-encoded with the
/// configured [`LossyEncoder`]. When the first encode is over the target size
/// a single second pass is made at a lower quality, never below the floor.
#[derive(Clone)]
pub struct ImageNormalizer {
    config: NormalizeConfig,
    encoder: Arc<dyn LossyEncoder>,
}

impl ImageNormalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self::with_encoder(config, Arc::new(JpegEncoder))
    }

    pub fn with_encoder(config: NormalizeConfig, encoder: Arc<dyn LossyEncoder>) -> Self {
        Self { config, encoder }
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize a pending image off the async runtime.
    pub async fn normalize(&self, file: &PendingFile) -> Result<NormalizedPayload, NormalizeError> {
        let this = self.clone();
        let name = file.name.clone();
        let data = file.data.clone();

        // Decode and encode are CPU-bound
        tokio::task::spawn_blocking(move || this.normalize_bytes(&name, &data))
            .await
            .map_err(|e| NormalizeError::Task(e.to_string()))?
    }

    /// Synchronous normalization of raw image bytes.
    pub fn normalize_bytes(
        &self,
        name: &str,
        data: &[u8],
    ) -> Result<NormalizedPayload, NormalizeError> {
        let img =
            image::load_from_memory(data).map_err(|e| NormalizeError::Decode(e.to_string()))?;
        let square = self.square(&img);
        let side = square.width();

        let mut quality = self.config.initial_quality;
        let mut bytes = self.encoder.encode(&square, quality)?;
        let mut encode_passes = 1u8;

        if bytes.len() > self.config.target_file_size_bytes && quality > self.config.quality_floor {
            quality = (quality - self.config.quality_step).max(self.config.quality_floor);
            bytes = self.encoder.encode(&square, quality)?;
            encode_passes = 2;
        }

        tracing::debug!(
            file_name = %name,
            side = side,
            quality = quality,
            encode_passes = encode_passes,
            encoded_size = bytes.len(),
            "Image normalized"
        );

        Ok(self.payload(name, data.len() as u64, side, quality, encode_passes, bytes))
    }

    /// Center-crop to the largest square, then resize to the side the square
    /// would have after scale-to-fit.
    fn square(&self, img: &DynamicImage) -> DynamicImage {
        let (width, height) = (img.width(), img.height());
        let (scaled_w, scaled_h) = scale_to_fit(width, height, self.config.max_dimension);
        let target_side = scaled_w.min(scaled_h);

        let (x, y, side) = center_square(width, height);
        let cropped = img.crop_imm(x, y, side, side);

        if side == target_side {
            cropped
        } else {
            cropped.resize_exact(target_side, target_side, FilterType::Lanczos3)
        }
    }

    fn payload(
        &self,
        name: &str,
        original_size: u64,
        side: u32,
        quality: f32,
        encode_passes: u8,
        bytes: Bytes,
    ) -> NormalizedPayload {
        NormalizedPayload {
            file_name: normalized_file_name(name, self.encoder.extension()),
            encoded_size: bytes.len(),
            bytes,
            dimensions: (side, side),
            original_size,
            mime_type: self.encoder.mime_type(),
            quality,
            encode_passes,
        }
    }
}
