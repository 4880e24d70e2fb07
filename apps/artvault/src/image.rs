//! # Image References
//!
//! Turns the `--image` argument of an upload into the string stored on the
//! listing.
//!
//! ```text
//! "https://images.example/a.jpg" ──────────────► stored as-is
//! "data:image/png;base64,iVBO..." ─────────────► stored as-is
//! "./sunset.png" ──► read file ──► base64 ─────► "data:image/png;base64,..."
//! ```
//!
//! Only a handful of web image formats are accepted, and files over
//! [`MAX_IMAGE_BYTES`] are refused before they are read.

use base64::Engine;
use std::path::Path;
use tracing::debug;

use artvault_core::MAX_IMAGE_BYTES;

use crate::error::ApiError;

/// Maps a file extension to its MIME type.
fn mime_type_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

fn build_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{encoded}")
}

/// Whether `input` is already something a browser can display directly.
fn is_remote_or_inline(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.starts_with("data:")
}

/// Resolves an image argument to a URL or data URL.
///
/// ## Errors
/// - `VALIDATION_ERROR`: empty input, unsupported extension, file too large
/// - `IO_ERROR`: the file cannot be read
pub fn resolve_image(input: &str) -> Result<String, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::validation("image is required"));
    }

    if is_remote_or_inline(input) {
        return Ok(input.to_string());
    }

    load_data_url(Path::new(input))
}

/// Reads a local image file and encodes it as a data URL.
pub fn load_data_url(path: &Path) -> Result<String, ApiError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let mime_type = mime_type_from_extension(extension).ok_or_else(|| {
        ApiError::validation(format!(
            "Unsupported image type '{}': use png, jpg, gif, webp or svg",
            extension
        ))
    })?;

    let metadata = std::fs::metadata(path)
        .map_err(|e| ApiError::io(format!("Failed to read image metadata: {e}")))?;

    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::validation(format!(
            "Image is too large ({} bytes, max {} bytes)",
            metadata.len(),
            MAX_IMAGE_BYTES
        )));
    }

    let bytes =
        std::fs::read(path).map_err(|e| ApiError::io(format!("Failed to read image: {e}")))?;

    debug!(?path, mime_type, size = bytes.len(), "Image encoded as data URL");

    Ok(build_data_url(mime_type, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_urls_pass_through() {
        let url = "https://images.unsplash.com/photo-1?w=800";
        assert_eq!(resolve_image(url).unwrap(), url);

        let inline = "data:image/gif;base64,R0lGOD";
        assert_eq!(resolve_image(inline).unwrap(), inline);
    }

    #[test]
    fn test_local_png_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.PNG");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = resolve_image(path.to_str().unwrap()).unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_mime_types() {
        assert_eq!(mime_type_from_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(mime_type_from_extension("JPG"), Some("image/jpeg"));
        assert_eq!(mime_type_from_extension("svg"), Some("image/svg+xml"));
        assert_eq!(mime_type_from_extension("bmp"), None);
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = resolve_image(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");

        let err = resolve_image(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            resolve_image("   ").unwrap_err().code,
            ErrorCode::ValidationError
        );
    }
}
