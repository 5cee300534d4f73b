//! Shared key generation for transport backends.
//!
//! Key format: `products-video/{timestamp_ms}-{filename}` for videos,
//! `products-images/{timestamp_ms}-{filename}` for everything else.

use leafy_core::constants::{IMAGE_FOLDER, VIDEO_FOLDER};
use leafy_core::MediaKind;

/// Folder an object lands in, chosen by content type.
pub fn folder_for(content_type: &str) -> &'static str {
    match MediaKind::from_mime(content_type) {
        Some(MediaKind::Video) => VIDEO_FOLDER,
        _ => IMAGE_FOLDER,
    }
}

/// Generate an object key for the given content type and filename.
///
/// The filename is reduced to its final path component and characters outside
/// `[A-Za-z0-9._-]` become `_`, so the key can never escape its folder.
pub fn generate_object_key(content_type: &str, filename: &str, timestamp_ms: i64) -> String {
    format!(
        "{}/{}-{}",
        folder_for(content_type),
        timestamp_ms,
        sanitize_filename(filename)
    )
}

fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 200;
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let mut s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    while s.contains("..") {
        s = s.replace("..", ".");
    }
    if s.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        s
    }
}
