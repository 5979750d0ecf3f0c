// Supported image formats and size limits for vision calls

/// Maximum accepted image payload (raw bytes, before base64 expansion).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image formats the Gemini vision modality accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageFormat {
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::Webp),
            "image/gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }
}

/// Validate raw image size against the inline-data limit.
pub fn validate_image_size(len: usize) -> std::result::Result<(), String> {
    if len == 0 {
        return Err("Image data is empty".to_string());
    }
    if len > MAX_IMAGE_BYTES {
        return Err(format!(
            "Image too large: {} bytes (max {})",
            len, MAX_IMAGE_BYTES
        ));
    }
    Ok(())
}
