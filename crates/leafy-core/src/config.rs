//! Configuration module
//!
//! Upload pipeline settings: validation limits, image normalization policy,
//! retry policy and transport selection. Values come from the environment
//! (optionally via a `.env` file) and fall back to the storefront defaults in
//! [`crate::constants`].

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ALLOWED_MIME_PREFIXES, DEFAULT_MAX_FILE_SIZE_BYTES, DEFAULT_MAX_NUMBER_OF_FILES,
    JPEG_QUALITY, MAX_DIMENSION, MAX_DIMENSION_LIMIT, MAX_RETRY_ATTEMPTS,
    MAX_RETRY_ATTEMPTS_LIMIT, QUALITY_FLOOR, QUALITY_STEP, REQUEST_TIMEOUT_SECS, RETRY_DELAY_MS,
    TARGET_FILE_SIZE_BYTES,
};
use crate::transport_types::TransportBackend;

/// Image normalization policy
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizeConfig {
    pub max_dimension: u32,
    pub initial_quality: f32,
    pub quality_floor: f32,
    pub quality_step: f32,
    pub target_file_size_bytes: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            initial_quality: JPEG_QUALITY,
            quality_floor: QUALITY_FLOOR,
            quality_step: QUALITY_STEP,
            target_file_size_bytes: TARGET_FILE_SIZE_BYTES,
        }
    }
}

/// Retry policy for the transfer orchestrator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryConfig {
    /// Linear backoff: the wait after failed attempt `n` is `base_delay * n`.
    pub fn delay_after(&self, attempt_number: u32) -> Duration {
        self.base_delay * attempt_number
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRY_ATTEMPTS,
            base_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

/// Where payloads are sent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
    pub backend: TransportBackend,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            backend: TransportBackend::Http,
            api_url: None,
            api_key: None,
            local_storage_path: None,
            local_storage_base_url: None,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Upload pipeline configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    pub max_file_size_bytes: u64,
    /// Advisory: a larger batch is logged, not refused.
    pub max_number_of_files: usize,
    pub allowed_mime_prefixes: Vec<String>,
    pub normalize: NormalizeConfig,
    pub retry: RetryConfig,
    pub transport: TransportConfig,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_number_of_files: DEFAULT_MAX_NUMBER_OF_FILES,
            allowed_mime_prefixes: DEFAULT_ALLOWED_MIME_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            normalize: NormalizeConfig::default(),
            retry: RetryConfig::default(),
            transport: TransportConfig::default(),
        }
    }
}

/// Convert a megabyte setting to bytes, refusing values that overflow.
pub fn megabytes_to_bytes(megabytes: u64) -> Result<u64, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} MB does not fit in a byte count", megabytes))
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

impl UploadConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = Self::load_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Read the environment without validating, so callers can apply
    /// overrides (e.g. command-line flags) before calling [`validate`](Self::validate).
    pub fn load_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = UploadConfig::default();

        let max_file_size_mb = parse_or(
            "LEAFY_MAX_FILE_SIZE_MB",
            DEFAULT_MAX_FILE_SIZE_BYTES / (1024 * 1024),
        );

        let allowed_mime_prefixes = env::var("LEAFY_ALLOWED_MIME_PREFIXES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_mime_prefixes);

        let backend = match env::var("LEAFY_TRANSPORT") {
            Ok(v) => v
                .parse::<TransportBackend>()
                .map_err(|_| anyhow::anyhow!("LEAFY_TRANSPORT must be 'http' or 'local'"))?,
            Err(_) => TransportBackend::Http,
        };

        let target_file_size_kb =
            parse_or("LEAFY_TARGET_FILE_SIZE_KB", TARGET_FILE_SIZE_BYTES / 1024);
        let target_file_size_bytes = target_file_size_kb
            .checked_mul(1024)
            .ok_or_else(|| anyhow::anyhow!("LEAFY_TARGET_FILE_SIZE_KB is too large"))?;

        let config = UploadConfig {
            max_file_size_bytes: megabytes_to_bytes(max_file_size_mb)?,
            max_number_of_files: parse_or(
                "LEAFY_MAX_NUMBER_OF_FILES",
                DEFAULT_MAX_NUMBER_OF_FILES,
            ),
            allowed_mime_prefixes,
            normalize: NormalizeConfig {
                max_dimension: parse_or("LEAFY_MAX_DIMENSION", MAX_DIMENSION),
                initial_quality: parse_or("LEAFY_JPEG_QUALITY", JPEG_QUALITY),
                quality_floor: parse_or("LEAFY_QUALITY_FLOOR", QUALITY_FLOOR),
                quality_step: parse_or("LEAFY_QUALITY_STEP", QUALITY_STEP),
                target_file_size_bytes,
            },
            retry: RetryConfig {
                max_attempts: parse_or("LEAFY_MAX_RETRY_ATTEMPTS", MAX_RETRY_ATTEMPTS),
                base_delay: Duration::from_millis(parse_or(
                    "LEAFY_RETRY_DELAY_MS",
                    RETRY_DELAY_MS,
                )),
            },
            transport: TransportConfig {
                backend,
                api_url: env::var("LEAFY_API_URL").ok(),
                api_key: env::var("LEAFY_API_KEY").ok(),
                local_storage_path: env::var("LEAFY_LOCAL_STORAGE_PATH").ok(),
                local_storage_base_url: env::var("LEAFY_LOCAL_STORAGE_BASE_URL").ok(),
                request_timeout: Duration::from_secs(parse_or(
                    "LEAFY_REQUEST_TIMEOUT_SECS",
                    REQUEST_TIMEOUT_SECS,
                )),
            },
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("LEAFY_MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.allowed_mime_prefixes.is_empty() {
            return Err(anyhow::anyhow!(
                "LEAFY_ALLOWED_MIME_PREFIXES must list at least one prefix"
            ));
        }

        if !(1..=MAX_DIMENSION_LIMIT).contains(&self.normalize.max_dimension) {
            return Err(anyhow::anyhow!(
                "LEAFY_MAX_DIMENSION must be between 1 and {}",
                MAX_DIMENSION_LIMIT
            ));
        }

        let n = &self.normalize;
        if !(0.0..=1.0).contains(&n.initial_quality) || !(0.0..=1.0).contains(&n.quality_floor) {
            return Err(anyhow::anyhow!(
                "LEAFY_JPEG_QUALITY and LEAFY_QUALITY_FLOOR must be between 0.0 and 1.0"
            ));
        }
        if n.quality_floor > n.initial_quality {
            return Err(anyhow::anyhow!(
                "LEAFY_QUALITY_FLOOR cannot exceed LEAFY_JPEG_QUALITY"
            ));
        }

        if !(1..=MAX_RETRY_ATTEMPTS_LIMIT).contains(&self.retry.max_attempts) {
            return Err(anyhow::anyhow!(
                "LEAFY_MAX_RETRY_ATTEMPTS must be between 1 and {}",
                MAX_RETRY_ATTEMPTS_LIMIT
            ));
        }

        match self.transport.backend {
            TransportBackend::Http => {
                if self.transport.api_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LEAFY_API_URL must be set when using the http transport"
                    ));
                }
            }
            TransportBackend::Local => {
                if self.transport.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LEAFY_LOCAL_STORAGE_PATH must be set when using the local transport"
                    ));
                }
                if self.transport.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LEAFY_LOCAL_STORAGE_BASE_URL must be set when using the local transport"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config() -> UploadConfig {
        let mut config = UploadConfig::default();
        config.transport.api_url = Some("http://localhost:5000".to_string());
        config
    }

    #[test]
    fn test_defaults_match_storefront() {
        let config = UploadConfig::default();
        assert_eq!(config.max_file_size_bytes, 20_971_520);
        assert_eq!(config.normalize.max_dimension, 2048);
        assert_eq!(config.normalize.target_file_size_bytes, 300 * 1024);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_millis(1000));
        assert_eq!(config.allowed_mime_prefixes, vec!["image/", "video/"]);
    }

    #[test]
    fn test_linear_backoff() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_after(1), Duration::from_millis(1000));
        assert_eq!(retry.delay_after(2), Duration::from_millis(2000));
        assert_eq!(retry.delay_after(3), Duration::from_millis(3000));
    }

    #[test]
    fn test_validate_ok() {
        assert!(http_config().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_api_url_for_http() {
        let config = UploadConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LEAFY_API_URL"));
    }

    #[test]
    fn test_validate_requires_local_settings() {
        let mut config = UploadConfig::default();
        config.transport.backend = TransportBackend::Local;
        config.transport.local_storage_path = Some("/tmp/leafy".to_string());
        assert!(config.validate().is_err());

        config.transport.local_storage_base_url = Some("http://localhost/media".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = http_config();
        config.retry.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_floor_above_quality() {
        let mut config = http_config();
        config.normalize.quality_floor = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_max_dimension() {
        let mut config = http_config();
        config.normalize.max_dimension = MAX_DIMENSION_LIMIT;
        assert!(config.validate().is_ok());

        config.normalize.max_dimension = MAX_DIMENSION_LIMIT + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LEAFY_MAX_DIMENSION"));

        config.normalize.max_dimension = 100_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_max_attempts() {
        let mut config = http_config();
        config.retry.max_attempts = MAX_RETRY_ATTEMPTS_LIMIT;
        assert!(config.validate().is_ok());

        config.retry.max_attempts = u32::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("LEAFY_MAX_RETRY_ATTEMPTS"));
    }

    #[test]
    fn test_megabytes_to_bytes() {
        assert_eq!(megabytes_to_bytes(20).unwrap(), 20 * 1024 * 1024);
        assert_eq!(megabytes_to_bytes(0).unwrap(), 0);
        assert!(megabytes_to_bytes(u64::MAX).is_err());
        assert!(megabytes_to_bytes(u64::MAX / (1024 * 1024) + 1).is_err());
    }
}
