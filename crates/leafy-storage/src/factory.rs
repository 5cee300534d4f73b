#[cfg(feature = "transport-http")]
use crate::HttpTransport;
#[cfg(feature = "transport-local")]
use crate::LocalStorage;
use crate::{TransferError, TransferResult, TransportBackend, UploadTransport};
use leafy_core::TransportConfig;
use std::sync::Arc;

/// Create a transport based on configuration
pub async fn create_transport(
    config: &TransportConfig,
) -> TransferResult<Arc<dyn UploadTransport>> {
    match config.backend {
        #[cfg(feature = "transport-http")]
        TransportBackend::Http => {
            let api_url = config.api_url.clone().ok_or_else(|| {
                TransferError::ConfigError("LEAFY_API_URL not configured".to_string())
            })?;
            let transport =
                HttpTransport::new(api_url, config.api_key.clone(), config.request_timeout)?;
            Ok(Arc::new(transport))
        }

        #[cfg(not(feature = "transport-http"))]
        TransportBackend::Http => Err(TransferError::ConfigError(
            "HTTP transport not available (transport-http feature not enabled)".to_string(),
        )),

        #[cfg(feature = "transport-local")]
        TransportBackend::Local => {
            let base_path = config.local_storage_path.clone().ok_or_else(|| {
                TransferError::ConfigError("LEAFY_LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = config.local_storage_base_url.clone().ok_or_else(|| {
                TransferError::ConfigError(
                    "LEAFY_LOCAL_STORAGE_BASE_URL not configured".to_string(),
                )
            })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "transport-local"))]
        TransportBackend::Local => Err(TransferError::ConfigError(
            "Local transport not available (transport-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "transport-local")]
    #[tokio::test]
    async fn test_create_local_transport() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = TransportConfig {
            backend: TransportBackend::Local,
            local_storage_path: Some(dir.path().to_string_lossy().to_string()),
            local_storage_base_url: Some("http://localhost:5000/media".to_string()),
            ..Default::default()
        };

        let transport = create_transport(&config).await.unwrap();
        assert_eq!(transport.backend_type(), TransportBackend::Local);
    }

    #[cfg(feature = "transport-http")]
    #[tokio::test]
    async fn test_create_http_transport_requires_url() {
        let config = TransportConfig::default();
        let result = create_transport(&config).await;
        assert!(matches!(result, Err(TransferError::ConfigError(_))));

        let config = TransportConfig {
            api_url: Some("http://localhost:5000".to_string()),
            ..Default::default()
        };
        let transport = create_transport(&config).await.unwrap();
        assert_eq!(transport.backend_type(), TransportBackend::Http);
    }
}
