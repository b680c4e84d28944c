//! Image decoding for the mosaic pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes into RGBA rasters (EXIF orientation applied)
//! - Resolving opaque [`ImageSource`]s behind a single async barrier
//! - Stretching photos to exact tile dimensions
//!
//! # Architecture
//!
//! Loading bytes is a collaborator concern (file inputs, fetches, canvases).
//! The pipeline receives futures that resolve to sources, joins them with
//! [`resolve_all`], and only then starts analysis and compositing.

mod codec;
mod resize;
mod source;
mod types;

pub use codec::decode_image;
pub use resize::stretch;
pub use source::{resolve, resolve_all, ImageSource};
pub use types::{DecodeError, FilterType, Orientation, RasterImage, CHANNELS};
