// Image payload types and validation constraints

use base64::Engine;
use bytes::Bytes;

/// A creative image normalized to the canonical byte representation,
/// ready for provider-specific encoding.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Raw image bytes.
    pub data: Bytes,

    /// MIME type, declared by the data URI or sniffed from magic bytes.
    /// `image/jpeg` is assumed when neither source gives one.
    pub mime_type: String,

    /// The inline data URI the request carried, when it carried one.
    /// Reused verbatim for providers that consume base64 URIs so the
    /// caller's encoding round-trips untouched.
    data_uri: Option<String>,
}

impl NormalizedImage {
    pub fn from_bytes(data: Bytes, mime_type: String) -> Self {
        Self {
            data,
            mime_type,
            data_uri: None,
        }
    }

    pub fn from_data_uri(data: Bytes, mime_type: String, uri: String) -> Self {
        Self {
            data,
            mime_type,
            data_uri: Some(uri),
        }
    }

    /// Base64 data URI form for providers that consume URI strings.
    pub fn as_data_uri(&self) -> String {
        match &self.data_uri {
            Some(uri) => uri.clone(),
            None => format!(
                "data:{};base64,{}",
                self.mime_type,
                base64::engine::general_purpose::STANDARD.encode(&self.data)
            ),
        }
    }

    /// Raw base64 payload (no URI prefix) for providers that consume
    /// tagged inline data.
    pub fn as_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from magic bytes at the start of the payload.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        if data.starts_with(b"\xFF\xD8\xFF") {
            Some(ImageFormat::Jpeg)
        } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
            Some(ImageFormat::WebP)
        } else {
            None
        }
    }
}

/// Validate image payload size against the configured cap.
pub fn validate_image_size(data_len: usize, max_bytes: usize) -> Result<(), String> {
    if data_len > max_bytes {
        return Err(format!(
            "Image size {} bytes exceeds maximum of {} bytes",
            data_len, max_bytes
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_jpeg() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
        data.extend_from_slice(&[0u8; 12]);
        assert_eq!(ImageFormat::detect(&data), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn test_detect_png() {
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(&[0u8; 8]);
        assert_eq!(ImageFormat::detect(&data), Some(ImageFormat::Png));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(ImageFormat::detect(b"plain text, not an image"), None);
        assert_eq!(ImageFormat::detect(b"short"), None);
    }

    #[test]
    fn test_data_uri_round_trip_is_verbatim() {
        let uri = "data:image/png;base64,iVBORw0KGgo=".to_string();
        let image = NormalizedImage::from_data_uri(
            Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            "image/png".to_string(),
            uri.clone(),
        );
        assert_eq!(image.as_data_uri(), uri);
    }

    #[test]
    fn test_downloaded_bytes_encode_to_data_uri() {
        let image = NormalizedImage::from_bytes(Bytes::from_static(b"test"), "image/jpeg".to_string());
        assert_eq!(image.as_data_uri(), "data:image/jpeg;base64,dGVzdA==");
        assert_eq!(image.as_base64(), "dGVzdA==");
    }

    #[test]
    fn test_validate_image_size() {
        assert!(validate_image_size(100, 1000).is_ok());
        assert!(validate_image_size(1001, 1000).is_err());
    }
}
