//! Image sources and the decode barrier.
//!
//! The core never fetches anything itself. Callers hand it futures that
//! resolve to an [`ImageSource`] (bytes read from a file input, a fetched
//! URL, a canvas the user drew on) and the barrier here decodes them into
//! [`RasterImage`]s.

use std::future::Future;
use std::path::PathBuf;

use futures::future::try_join_all;

use super::{decode_image, DecodeError, RasterImage};

/// An opaque reference to an image, resolved to a raster by [`ImageSource::decode`].
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Encoded image bytes (JPEG or PNG).
    Encoded(Vec<u8>),
    /// A file on the local filesystem.
    File(PathBuf),
    /// An already-decoded raster, e.g. a drawn canvas.
    Raster(RasterImage),
}

impl ImageSource {
    /// Resolve this source to a decoded raster.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::IoError` if a file cannot be read, any
    /// [`decode_image`] error for encoded data, and `DecodeError::EmptyImage`
    /// for a zero-dimension raster.
    pub fn decode(self) -> Result<RasterImage, DecodeError> {
        match self {
            ImageSource::Encoded(bytes) => decode_image(&bytes),
            ImageSource::File(path) => {
                let bytes = std::fs::read(&path)
                    .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
                decode_image(&bytes)
            }
            ImageSource::Raster(raster) => {
                raster.ensure_not_empty()?;
                Ok(raster)
            }
        }
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Encoded(bytes)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

impl From<RasterImage> for ImageSource {
    fn from(raster: RasterImage) -> Self {
        ImageSource::Raster(raster)
    }
}

/// Await one pending source and decode it.
pub async fn resolve<F>(pending: F) -> Result<RasterImage, DecodeError>
where
    F: Future<Output = Result<ImageSource, DecodeError>>,
{
    pending.await?.decode()
}

/// Await every pending source concurrently and decode them, preserving order.
///
/// This is a single barrier: it resolves only once every source has decoded.
/// The first failure resolves the whole call to that error and drops the
/// loads still in flight, and dropping the returned future cancels all of them.
pub async fn resolve_all<I, F>(pending: I) -> Result<Vec<RasterImage>, DecodeError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<ImageSource, DecodeError>>,
{
    try_join_all(pending.into_iter().map(resolve)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{png_bytes, MINIMAL_JPEG};
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn test_decode_encoded_source() {
        let raster = ImageSource::from(MINIMAL_JPEG.to_vec()).decode().unwrap();
        assert_eq!((raster.width(), raster.height()), (1, 1));
    }

    #[test]
    fn test_decode_raster_source_passes_through() {
        let raster = RasterImage::filled(3, 3, [1, 2, 3, 4]);
        let decoded = ImageSource::from(raster.clone()).decode().unwrap();
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_decode_empty_raster_source() {
        let raster = RasterImage::new(0, 5, vec![]).unwrap();
        assert!(matches!(
            ImageSource::Raster(raster).decode(),
            Err(DecodeError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_decode_missing_file() {
        let source = ImageSource::File(PathBuf::from("/definitely/not/here.png"));
        assert!(matches!(source.decode(), Err(DecodeError::IoError(_))));
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let first = png_bytes(1, 1, &[255, 0, 0, 255]);
        let second = png_bytes(2, 1, &[0, 255, 0, 255, 0, 255, 0, 255]);

        let rasters = block_on(resolve_all(vec![
            ready(Ok(ImageSource::Encoded(first))),
            ready(Ok(ImageSource::Encoded(second))),
        ]))
        .unwrap();

        assert_eq!(rasters.len(), 2);
        assert_eq!(rasters[0].width(), 1);
        assert_eq!(rasters[1].width(), 2);
    }

    #[test]
    fn test_resolve_all_empty() {
        let sources: Vec<futures::future::Ready<Result<ImageSource, DecodeError>>> = Vec::new();
        let rasters = block_on(resolve_all(sources)).unwrap();
        assert!(rasters.is_empty());
    }

    #[test]
    fn test_resolve_all_fails_on_first_error() {
        let result = block_on(resolve_all(vec![
            ready(Ok(ImageSource::Encoded(MINIMAL_JPEG.to_vec()))),
            ready(Err(DecodeError::LoadFailed("timeout".to_string()))),
        ]));
        assert!(matches!(result, Err(DecodeError::LoadFailed(_))));
    }

    #[test]
    fn test_resolve_all_error_does_not_wait_for_pending_loads() {
        // A load that never completes must not keep the request alive once
        // another load has already failed.
        let loads: Vec<futures::future::BoxFuture<'static, Result<ImageSource, DecodeError>>> = vec![
            Box::pin(pending()),
            Box::pin(ready(Ok(ImageSource::Encoded(vec![0x00, 0x01])))),
        ];
        let result = block_on(resolve_all(loads));
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }
}
