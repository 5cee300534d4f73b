//! Leafy Storage Library
//!
//! This crate provides the transport abstraction the upload pipeline sends
//! payloads through, plus two implementations: a multipart HTTP client for the
//! storefront's upload endpoint and a local filesystem backend.
//!
//! # Object key format
//!
//! Backends that choose their own keys use the storefront bucket layout:
//!
//! - **Images**: `products-images/{timestamp_ms}-{filename}`
//! - **Videos**: `products-video/{timestamp_ms}-{filename}`
//!
//! Keys never contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so every backend stays consistent.

pub mod factory;
#[cfg(feature = "transport-http")]
pub mod http;
pub mod keys;
#[cfg(feature = "transport-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_transport;
#[cfg(feature = "transport-http")]
pub use http::HttpTransport;
#[cfg(feature = "transport-local")]
pub use local::LocalStorage;
pub use leafy_core::TransportBackend;
pub use traits::{TransferError, TransferResult, UploadTransport};
