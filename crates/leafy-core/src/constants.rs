//! Pipeline defaults shared by configuration and tests.

/// 20 MiB, the storefront's per-file ceiling.
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 20 * 1024 * 1024;

/// Advisory only; exceeding it is logged, never enforced.
pub const DEFAULT_MAX_NUMBER_OF_FILES: usize = 10;

pub const DEFAULT_ALLOWED_MIME_PREFIXES: &[&str] = &["image/", "video/"];

/// Longest edge of a normalized image, in pixels.
pub const MAX_DIMENSION: u32 = 2048;

/// Largest `max_dimension` configuration accepts.
pub const MAX_DIMENSION_LIMIT: u32 = 16384;

/// Initial lossy quality factor (0.0 - 1.0).
pub const JPEG_QUALITY: f32 = 0.85;

/// The second encode pass never drops below this factor.
pub const QUALITY_FLOOR: f32 = 0.5;

pub const QUALITY_STEP: f32 = 0.1;

/// Byte budget that triggers the second encode pass.
pub const TARGET_FILE_SIZE_BYTES: usize = 300 * 1024;

pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Largest `max_attempts` configuration accepts.
pub const MAX_RETRY_ATTEMPTS_LIMIT: u32 = 10;

/// Base interval for linear backoff: attempt `n` waits `n * RETRY_DELAY_MS`
/// before retrying.
pub const RETRY_DELAY_MS: u64 = 1000;

/// HTTP statuses treated as transient by the transfer orchestrator.
/// 544 is the storage provider's upstream timeout code.
pub const RETRYABLE_STATUS_CODES: &[u16] = &[503, 504, 544];

/// Error-text fragments that mark a failure as transient.
pub const RETRYABLE_ERROR_FRAGMENTS: &[&str] = &["timeout", "timed out", "network", "connection"];

/// Multipart field the storefront upload endpoint reads files from.
pub const UPLOAD_FIELD_NAME: &str = "files";

pub const UPLOAD_PATH: &str = "/api/upload";

pub const NORMALIZED_MIME_TYPE: &str = "image/jpeg";
pub const NORMALIZED_EXTENSION: &str = "jpg";

/// Object key folders used by the storefront's bucket layout.
pub const IMAGE_FOLDER: &str = "products-images";
pub const VIDEO_FOLDER: &str = "products-video";

pub const REQUEST_TIMEOUT_SECS: u64 = 60;
