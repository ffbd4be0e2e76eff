//! Image container detection from leading bytes.
//!
//! The client-declared content type is only used for a fast rejection at the
//! HTTP boundary. The MIME type sent upstream always comes from here.

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

/// Bytes needed before any signature is compared.
pub const MIN_SNIFF_LEN: usize = 12;

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_MAGIC: &[u8] = b"WEBP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("File too small to detect image format ({len} bytes)")]
    TooSmall { len: usize },
    #[error("Unsupported image format")]
    Unsupported,
}

impl ImageFormat {
    pub fn detect(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < MIN_SNIFF_LEN {
            return Err(FormatError::TooSmall { len: bytes.len() });
        }

        if bytes.starts_with(JPEG_MAGIC) {
            Ok(ImageFormat::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Ok(ImageFormat::Png)
        } else if bytes.starts_with(RIFF_MAGIC) && &bytes[8..12] == WEBP_MAGIC {
            Ok(ImageFormat::Webp)
        } else {
            Err(FormatError::Unsupported)
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Whether a client-declared content type names this format.
    pub fn matches_mime(self, declared: &str) -> bool {
        match self {
            ImageFormat::Jpeg => declared == "image/jpeg" || declared == "image/jpg",
            other => declared == other.mime(),
        }
    }

    /// Inline `data:` URI for the outbound model request.
    pub fn data_uri(self, bytes: &[u8]) -> String {
        format!(
            "data:{};base64,{}",
            self.mime(),
            general_purpose::STANDARD.encode(bytes)
        )
    }
}
