//! Multipart HTTP transport for the storefront upload endpoint.
//!
//! Posts each payload to `{base_url}/api/upload` under the `files` field and
//! expects `{ "urls": [...] }` back.

use crate::traits::{TransferError, TransferResult, UploadTransport};
use crate::TransportBackend;
use async_trait::async_trait;
use leafy_core::constants::{UPLOAD_FIELD_NAME, UPLOAD_PATH};
use leafy_core::UploadPayload;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    #[serde(default)]
    urls: Vec<String>,
}

/// HTTP transport. Construct once per caller and share via `Arc`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    /// Sent as `X-API-Key` when present
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> TransferResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransferError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-API-Key", key.as_str()),
            None => request,
        }
    }

    fn map_send_error(err: reqwest::Error) -> TransferError {
        if err.is_timeout() {
            TransferError::Timeout(err.to_string())
        } else {
            TransferError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn upload(&self, payload: &UploadPayload) -> TransferResult<Vec<String>> {
        let part = reqwest::multipart::Part::bytes(payload.data.to_vec())
            .file_name(payload.file_name.clone())
            .mime_str(&payload.content_type)
            .map_err(|e| {
                TransferError::ConfigError(format!(
                    "Invalid content type {}: {}",
                    payload.content_type, e
                ))
            })?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

        let url = self.upload_url();
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        let response = request.send().await.map_err(Self::map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransferError::Status {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            TransferError::InvalidResponse(format!("Failed to parse response as JSON: {}", e))
        })?;

        if body.urls.is_empty() {
            return Err(TransferError::NoUrls);
        }

        tracing::debug!(
            url = %url,
            file_name = %payload.file_name,
            size_bytes = payload.len(),
            returned = body.urls.len(),
            "HTTP upload accepted"
        );

        Ok(body.urls)
    }

    fn backend_type(&self) -> TransportBackend {
        TransportBackend::Http
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::Matcher;

    fn payload() -> UploadPayload {
        UploadPayload {
            file_name: "kush.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"jpeg-bytes"),
        }
    }

    fn transport(base_url: String, api_key: Option<&str>) -> HttpTransport {
        HttpTransport::new(base_url, api_key.map(String::from), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_urls() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .match_header("x-api-key", "secret")
            .match_body(Matcher::Regex(
                r#"name="files"; filename="kush.jpg""#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"urls":["https://cdn.example.com/products-images/1-kush.jpg"]}"#)
            .create_async()
            .await;

        let transport = transport(server.url(), Some("secret"));
        let urls = transport.upload(&payload()).await.unwrap();

        assert_eq!(urls, vec!["https://cdn.example.com/products-images/1-kush.jpg"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gateway_timeout_is_retryable_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(504)
            .with_body("gateway timeout")
            .create_async()
            .await;

        let err = transport(server.url(), None)
            .upload(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(504));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_bad_request_is_terminal() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(400)
            .with_body(r#"{"error":"No files provided"}"#)
            .create_async()
            .await;

        let err = transport(server.url(), None)
            .upload(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_empty_url_list_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"urls":[]}"#)
            .create_async()
            .await;

        let err = transport(server.url(), None)
            .upload(&payload())
            .await
            .unwrap_err();

        assert!(matches!(err, TransferError::NoUrls));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_no_api_key_header_without_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload")
            .match_header("x-api-key", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"urls":["u"]}"#)
            .create_async()
            .await;

        let urls = transport(server.url(), None).upload(&payload()).await.unwrap();

        assert_eq!(urls, vec!["u"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let transport = transport("http://127.0.0.1:1".to_string(), None);
        let err = transport.upload(&payload()).await.unwrap_err();
        assert!(matches!(err, TransferError::Network(_) | TransferError::Timeout(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_upload_url_trims_trailing_slash() {
        let transport = transport("http://localhost:5000/".to_string(), None);
        assert_eq!(transport.upload_url(), "http://localhost:5000/api/upload");
        assert_eq!(transport.backend_type(), TransportBackend::Http);
    }
}
