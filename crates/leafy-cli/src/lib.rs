use std::path::Path;

use anyhow::Context;
use leafy_core::PendingFile;

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Guess a MIME type from the file extension. Unknown extensions map to
/// `application/octet-stream`, which the validator then refuses.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        // Anything else is refused later
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Read a file from disk into a pending upload.
///
/// The size is taken from file metadata first. A file over `max_file_size`
/// is not read: it comes back with empty data and its real `size_bytes`, so
/// the validator still rejects it with the right size.
pub async fn read_pending_file(path: &Path, max_file_size: u64) -> anyhow::Result<PendingFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_for_path(path);

    if metadata.len() > max_file_size {
        tracing::debug!(
            file_name = %name,
            size_bytes = metadata.len(),
            max_file_size,
            "Skipping read of oversized file"
        );
        let mut file = PendingFile::new(name, mime_type, Vec::new());
        file.size_bytes = metadata.len();
        return Ok(file);
    }

    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(PendingFile::new(name, mime_type, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("dir/b.png")), "image/png");
        assert_eq!(mime_for_path(Path::new("c.mov")), "video/quicktime");
        assert_eq!(mime_for_path(Path::new("menu.pdf")), "application/pdf");
    }

    #[test]
    fn mime_for_unknown_extension() {
        assert_eq!(mime_for_path(Path::new("README")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("x.zzz")), "application/octet-stream");
    }

    #[tokio::test]
    async fn read_pending_file_uses_base_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, b"0123456789").await.unwrap();

        let file = read_pending_file(&path, 1024).await.unwrap();
        assert_eq!(file.name, "clip.mp4");
        assert_eq!(file.mime_type, "video/mp4");
        assert_eq!(file.size_bytes, 10);
        assert_eq!(&file.data[..], b"0123456789");
    }

    #[tokio::test]
    async fn read_pending_file_skips_oversized_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("big.png");
        tokio::fs::write(&path, b"0123456789").await.unwrap();

        let file = read_pending_file(&path, 5).await.unwrap();
        assert_eq!(file.name, "big.png");
        assert_eq!(file.size_bytes, 10);
        assert!(file.data.is_empty());
    }

    #[tokio::test]
    async fn read_pending_file_sparse_large_file_not_loaded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("huge.mp4");
        let size = 64 * 1024 * 1024;
        std::fs::File::create(&path).unwrap().set_len(size).unwrap();

        let file = read_pending_file(&path, 20 * 1024 * 1024).await.unwrap();
        assert_eq!(file.size_bytes, size);
        assert!(file.data.is_empty());
    }

    #[tokio::test]
    async fn read_pending_file_missing() {
        let err = read_pending_file(Path::new("/definitely/not/here.png"), 1024)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
