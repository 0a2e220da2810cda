//! Image payload accepted by the extraction pipeline
//!
//! Clients send images base64-encoded inside JSON bodies. The payload is
//! validated up front by sniffing the magic bytes of the common raster
//! formats; anything else is rejected before a network call is made.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Raster image formats accepted for text extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// MIME type for this image format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }

    /// Detect the format from the leading bytes of the payload
    #[must_use]
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else {
            None
        }
    }
}

/// A validated raster image ready to be sent to the vision model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ImagePayload {
    /// Create a payload from raw bytes, validating the raster format
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::InvalidImage("image data is empty".to_string()));
        }

        let format = ImageFormat::sniff(&bytes).ok_or_else(|| {
            DomainError::InvalidImage(
                "unrecognized image data; expected PNG, JPEG, GIF or WebP".to_string(),
            )
        })?;

        Ok(Self { bytes, format })
    }

    /// Create a payload from a base64 string, with or without a data-URL prefix
    pub fn from_base64(encoded: &str) -> Result<Self, DomainError> {
        // Strip a "data:image/png;base64," style prefix if present
        let raw = encoded.rsplit_once(',').map_or(encoded, |(_, tail)| tail);

        let bytes = BASE64
            .decode(raw.trim())
            .map_err(|e| DomainError::InvalidImage(format!("invalid base64 data: {e}")))?;

        Self::from_bytes(bytes)
    }

    /// Raw image bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Detected raster format
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type of the detected format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size of the payload in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Re-encode the payload as plain base64 for JSON transport
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.bytes)
    }
}
