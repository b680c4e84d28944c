//! Output packaging: encoding a mosaic for download or sharing.
//!
//! - JPEG with configurable quality, flattened over a background color
//! - Lossless PNG that keeps the transparent background
//! - Download filenames and share-sheet payloads
//!
//! Encoding never mutates the raster. A failed encode can be retried with
//! different options.

mod jpeg;
mod png;
mod share;
mod types;

pub use jpeg::{encode_jpeg, flatten_rgba};
pub use png::encode_png;
pub use share::{to_share_payload, SharePayload, DOWNLOAD_BASENAME, SHARE_TEXT, SHARE_TITLE};
pub use types::{download_filename, EncodeError, EncodeFormat, EncodeOptions, EncodedMosaic};

use crate::decode::{RasterImage, CHANNELS};

/// Check that `pixels` holds exactly `width * height` RGBA pixels.
pub(crate) fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Encode a raster with the given options.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero-size raster and
/// `EncodeError::EncodingFailed` if the codec rejects the data.
pub fn encode(raster: &RasterImage, options: &EncodeOptions) -> Result<EncodedMosaic, EncodeError> {
    let (width, height) = (raster.width(), raster.height());
    let bytes = match options.format {
        EncodeFormat::Jpeg => encode_jpeg(
            raster.pixels(),
            width,
            height,
            options.quality,
            options.background,
        )?,
        EncodeFormat::Png => encode_png(raster.pixels(), width, height)?,
    };

    log::debug!(
        "Encoded {}x{} mosaic as {} ({} bytes)",
        width,
        height,
        options.format,
        bytes.len()
    );

    Ok(EncodedMosaic {
        bytes,
        format: options.format,
    })
}
