use crate::keys::generate_object_key;
use crate::traits::{TransferError, TransferResult, UploadTransport};
use crate::TransportBackend;
use async_trait::async_trait;
use leafy_core::UploadPayload;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem transport
///
/// Writes each payload under `base_path` using the storefront key layout and
/// answers with `{base_url}/{key}`, the way the storefront's bucket does.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for objects (e.g., "/var/lib/leafy/media")
    /// * `base_url` - Public base URL for serving them (e.g., "http://localhost:5000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> TransferResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            TransferError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert an object key to a filesystem path, refusing anything that
    /// could escape the base directory.
    fn key_to_path(&self, key: &str) -> TransferResult<PathBuf> {
        if key.contains("..") || key.starts_with('/') || key.contains('\\') {
            return Err(TransferError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    /// Generate public URL for an object
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> TransferResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UploadTransport for LocalStorage {
    async fn upload(&self, payload: &UploadPayload) -> TransferResult<Vec<String>> {
        let key = generate_object_key(
            &payload.content_type,
            &payload.file_name,
            chrono::Utc::now().timestamp_millis(),
        );
        let path = self.key_to_path(&key)?;

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            TransferError::ConfigError(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&payload.data).await?;
        file.sync_all().await?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = payload.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(vec![url])
    }

    fn backend_type(&self) -> TransportBackend {
        TransportBackend::Local
    }
}
