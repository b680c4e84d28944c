//! The set of photos tiles are drawn from.

use rand::Rng;

use crate::decode::RasterImage;
use crate::error::{MosaicError, Result};

/// An ordered, non-empty collection of decoded photos.
#[derive(Debug, Clone)]
pub struct PhotoPool {
    photos: Vec<RasterImage>,
}

impl PhotoPool {
    /// Build a pool from decoded photos.
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::EmptyPhotoPool` for an empty collection and
    /// `MosaicError::Decode` if any photo has a zero dimension.
    pub fn new(photos: Vec<RasterImage>) -> Result<Self> {
        if photos.is_empty() {
            return Err(MosaicError::EmptyPhotoPool);
        }
        for photo in &photos {
            photo.ensure_not_empty()?;
        }
        Ok(Self { photos })
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Never true for a pool built with [`PhotoPool::new`].
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RasterImage> {
        self.photos.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RasterImage> {
        self.photos.iter()
    }

    /// Draw a uniformly distributed photo index, with replacement.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.photos.len())
    }
}
