//! Types shared by the JPEG and PNG encoders.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::share::{to_share_payload, SharePayload, DOWNLOAD_BASENAME};
use crate::config::DEFAULT_JPEG_QUALITY;

/// Errors that can occur while encoding a mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: EncodeFormat, reason: String },
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodeFormat {
    #[default]
    Jpeg,
    Png,
}

impl EncodeFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "jpg",
            EncodeFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "image/jpeg",
            EncodeFormat::Png => "image/png",
        }
    }

    /// Parse a format name or extension, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Some(EncodeFormat::Jpeg),
            "png" | "image/png" => Some(EncodeFormat::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for EncodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeFormat::Jpeg => write!(f, "JPEG"),
            EncodeFormat::Png => write!(f, "PNG"),
        }
    }
}

/// How to encode a finished mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodeOptions {
    pub format: EncodeFormat,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub quality: u8,
    /// RGB that transparent regions are flattened onto for JPEG.
    pub background: [u8; 3],
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            format: EncodeFormat::default(),
            quality: DEFAULT_JPEG_QUALITY,
            background: [0, 0, 0],
        }
    }
}

impl EncodeOptions {
    pub fn png() -> Self {
        Self {
            format: EncodeFormat::Png,
            ..Self::default()
        }
    }

    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: EncodeFormat::Jpeg,
            quality,
            ..Self::default()
        }
    }
}

/// Encoded file bytes ready for download or sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMosaic {
    pub bytes: Vec<u8>,
    pub format: EncodeFormat,
}

impl EncodedMosaic {
    /// `photo-mosaic.jpg` or `photo-mosaic.png`.
    pub fn download_filename(&self) -> String {
        download_filename(self.format)
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn share_payload(&self) -> SharePayload {
        to_share_payload(
            self.bytes.clone(),
            self.download_filename(),
            self.mime_type().to_string(),
        )
    }

    pub fn into_share_payload(self) -> SharePayload {
        let filename = self.download_filename();
        let mime_type = self.mime_type().to_string();
        to_share_payload(self.bytes, filename, mime_type)
    }
}

/// Download filename for `format`.
pub fn download_filename(format: EncodeFormat) -> String {
    format!("{}.{}", DOWNLOAD_BASENAME, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_and_mime_types() {
        assert_eq!(EncodeFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodeFormat::Png.extension(), "png");
        assert_eq!(EncodeFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(EncodeFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EncodeFormat::from_name("JPG"), Some(EncodeFormat::Jpeg));
        assert_eq!(EncodeFormat::from_name("jpeg"), Some(EncodeFormat::Jpeg));
        assert_eq!(EncodeFormat::from_name("image/png"), Some(EncodeFormat::Png));
        assert_eq!(EncodeFormat::from_name("gif"), None);
    }

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename(EncodeFormat::Jpeg), "photo-mosaic.jpg");
        assert_eq!(download_filename(EncodeFormat::Png), "photo-mosaic.png");

        let encoded = EncodedMosaic {
            bytes: vec![1, 2, 3],
            format: EncodeFormat::Png,
        };
        assert_eq!(encoded.download_filename(), "photo-mosaic.png");
    }

    #[test]
    fn test_share_payload_from_encoded() {
        let encoded = EncodedMosaic {
            bytes: vec![9, 8, 7],
            format: EncodeFormat::Jpeg,
        };
        let payload = encoded.share_payload();
        assert_eq!(payload.bytes, vec![9, 8, 7]);
        assert_eq!(payload.filename, "photo-mosaic.jpg");
        assert_eq!(payload.mime_type, "image/jpeg");
        assert_eq!(payload, encoded.into_share_payload());
    }

    #[test]
    fn test_default_options() {
        let options = EncodeOptions::default();
        assert_eq!(options.format, EncodeFormat::Jpeg);
        assert_eq!(options.quality, 85);
        assert_eq!(options.background, [0, 0, 0]);
    }
}
