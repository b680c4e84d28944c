//! The single failure type returned by the pipeline.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Every way a mosaic request can fail.
///
/// All variants are terminal for the request that produced them. Nothing in
/// the core retries; an `Encode` failure leaves the composite raster intact so
/// the caller can encode again with different options.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// The template or one of the photos could not be loaded or decoded.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] DecodeError),

    /// Compositing was requested without any photos.
    #[error("At least one photo is required to build a mosaic")]
    EmptyPhotoPool,

    /// The output raster could not be sized or allocated.
    #[error("Cannot allocate {width}x{height} output raster: {reason}")]
    RasterAllocation {
        width: u64,
        height: u64,
        reason: String,
    },

    /// The finished raster could not be serialized.
    #[error("Failed to encode mosaic: {0}")]
    Encode(#[from] EncodeError),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MosaicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_converts() {
        let err: MosaicError = DecodeError::InvalidFormat.into();
        assert!(matches!(err, MosaicError::Decode(DecodeError::InvalidFormat)));
        assert_eq!(
            err.to_string(),
            "Failed to decode image: Invalid or unsupported image format"
        );
    }

    #[test]
    fn test_allocation_error_display() {
        let err = MosaicError::RasterAllocation {
            width: 0,
            height: 100,
            reason: "zero-size output".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot allocate 0x100 output raster: zero-size output"
        );
    }

    #[test]
    fn test_empty_pool_display() {
        assert_eq!(
            MosaicError::EmptyPhotoPool.to_string(),
            "At least one photo is required to build a mosaic"
        );
    }
}
