//! Stretching photos into tiles.
//!
//! Tiles fill their cell completely, so the photo's aspect ratio is ignored:
//! a 4000x3000 photo placed in a 50x50 cell is squashed, not cropped.

use super::{DecodeError, FilterType, RasterImage};

/// Stretch an image to exact dimensions, ignoring its aspect ratio.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` if the target or source has a zero dimension.
pub fn stretch(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    image.ensure_not_empty()?;

    // Fast path: if dimensions match, just clone
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgba_image(resized))
}
