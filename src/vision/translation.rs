// Image payload assembly for vision calls

use super::models::{validate_image_size, ImageFormat};
use crate::error::{AppError, Result};
use crate::models::gemini::InlineData;
use base64::Engine;

/// Build Gemini inline data from raw image bytes.
///
/// Detects the MIME type from magic bytes, validates format and size, and
/// base64-encodes the payload (no `data:` URI prefix; Gemini wants raw base64).
pub fn encode_image(bytes: &[u8]) -> Result<InlineData> {
    validate_image_size(bytes.len()).map_err(AppError::InvalidRequest)?;

    let media_type = detect_mime_type(bytes).ok_or_else(|| {
        AppError::InvalidRequest("Could not detect image format from data".to_string())
    })?;

    ImageFormat::from_mime_type(&media_type).ok_or_else(|| {
        AppError::InvalidRequest(format!("Unsupported image format: {}", media_type))
    })?;

    Ok(InlineData {
        mime_type: media_type,
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

/// Detect MIME type from magic bytes at start of image data
fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() < 12 {
        return None;
    }

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some("image/png".to_string());
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg".to_string());
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif".to_string());
    }
    // RIFF....WEBP
    if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        return Some("image/webp".to_string());
    }

    None
}
