//! JPEG encoding for downloads.
//!
//! JPEG has no alpha channel, so the RGBA mosaic is composited over a solid
//! background color first. Transparent regions come out as that color and
//! partially transparent tile pixels are blended onto it.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::{validate_rgba, EncodeError, EncodeFormat};

/// Blend one channel over the background: `c * a + bg * (1 - a)`, rounded.
#[inline]
fn over(channel: u8, background: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + background as u32 * (255 - a) + 127) / 255) as u8
}

/// Drop the alpha channel by compositing RGBA pixels over `background`.
pub fn flatten_rgba(pixels: &[u8], background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let alpha = px[3];
        rgb.push(over(px[0], background[0], alpha));
        rgb.push(over(px[1], background[1], alpha));
        rgb.push(over(px[2], background[2], alpha));
    }
    rgb
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
/// * `background` - RGB that transparency is flattened onto
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    background: [u8; 3],
) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let rgb = flatten_rgba(pixels, background);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: EncodeFormat::Jpeg,
            reason: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
