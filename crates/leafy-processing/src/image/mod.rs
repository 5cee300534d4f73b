//! Image normalization module
//!
//! This module turns any decodable image into a square, downscaled, lossy
//! re-encode sized for the storefront catalog:
//! - Geometry (resize): scale-to-fit and center-square math
//! - Normalizer: decode, crop, resize, encode with one quality fallback pass

pub mod normalizer;
pub mod resize;

pub use normalizer::{normalized_file_name, ImageNormalizer};
pub use resize::{center_square, scale_to_fit};

use leafy_core::{ErrorMetadata, LogLevel};

/// Why an image could not be normalized. Either way the pipeline falls back
/// to uploading the original bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to load image: {0}")]
    Decode(String),

    #[error("Failed to compress image: {0}")]
    Encode(String),

    #[error("Image task failed: {0}")]
    Task(String),
}

impl ErrorMetadata for NormalizeError {
    fn error_code(&self) -> &'static str {
        match self {
            NormalizeError::Decode(_) => "IMAGE_DECODE_FAILED",
            NormalizeError::Encode(_) => "IMAGE_ENCODE_FAILED",
            NormalizeError::Task(_) => "IMAGE_TASK_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Warn
    }
}
