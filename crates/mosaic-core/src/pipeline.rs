//! End-to-end mosaic generation.
//!
//! ```text
//! template future ─┐
//!                  ├─ decode barrier ─> analyze ─> composite ─> Mosaic
//! photo futures ───┘
//! ```
//!
//! Analysis and compositing start only after the template and every photo
//! have decoded. Encoding is a separate step on the returned [`Mosaic`].

use std::future::Future;

use futures::future::try_join;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::composite::{composite, CompositeRaster, PhotoPool, TilePlacement};
use crate::config::MosaicConfig;
use crate::decode::{resolve, resolve_all, DecodeError, ImageSource, RasterImage};
use crate::encode::{self, EncodeOptions, EncodedMosaic};
use crate::error::{MosaicError, Result};
use crate::template::{analyze, OccupancyMask};

/// A composited mosaic together with the mask it was painted from and the
/// encode options of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    composite: CompositeRaster,
    mask: OccupancyMask,
    encode_options: EncodeOptions,
}

impl Mosaic {
    pub fn raster(&self) -> &RasterImage {
        self.composite.raster()
    }

    pub fn mask(&self) -> &OccupancyMask {
        &self.mask
    }

    pub fn placements(&self) -> &[TilePlacement] {
        self.composite.placements()
    }

    pub fn width(&self) -> u32 {
        self.composite.width()
    }

    pub fn height(&self) -> u32 {
        self.composite.height()
    }

    /// Number of cells that received a photo.
    pub fn filled_cells(&self) -> usize {
        self.mask.filled_count()
    }

    /// The `encode` section of the config this mosaic was rendered with.
    pub fn encode_options(&self) -> &EncodeOptions {
        &self.encode_options
    }

    /// Encode the raster. The mosaic is left untouched, so a failed encode
    /// can be retried with other options.
    pub fn encode(&self, options: &EncodeOptions) -> Result<EncodedMosaic> {
        Ok(encode::encode(self.raster(), options)?)
    }

    /// Encode with [`Mosaic::encode_options`].
    pub fn encode_default(&self) -> Result<EncodedMosaic> {
        self.encode(&self.encode_options)
    }
}

/// The RNG type the pipeline constructs.
pub type MosaicRng = StdRng;

/// A deterministic RNG for reproducible tile assignments.
pub fn seeded_rng(seed: u64) -> MosaicRng {
    StdRng::seed_from_u64(seed)
}

/// The RNG a run with `config` should use: seeded when `config.seed` is set,
/// seeded from the operating system otherwise.
#[cfg(feature = "os-rng")]
pub fn rng_for(config: &MosaicConfig) -> MosaicRng {
    match config.seed {
        Some(seed) => seeded_rng(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Build a mosaic from already-decoded inputs.
///
/// # Errors
///
/// Returns `MosaicError::InvalidConfig` for an invalid configuration, a
/// decode error for an empty template, and `MosaicError::RasterAllocation`
/// if the output cannot be allocated.
pub fn render_mosaic<R: Rng + ?Sized>(
    template: &RasterImage,
    photos: &PhotoPool,
    config: &MosaicConfig,
    rng: &mut R,
) -> Result<Mosaic> {
    config.validate()?;

    let mask = analyze(template, config.cell_size, &config.analyze_options())?;
    let composite = composite(&mask, photos, &config.composite_options(), rng)?;

    log::info!(
        "Generated {}x{} mosaic: {} of {} cells filled from {} photos",
        composite.width(),
        composite.height(),
        mask.filled_count(),
        mask.grid().cell_count(),
        photos.len()
    );

    Ok(Mosaic {
        composite,
        mask,
        encode_options: config.encode,
    })
}

/// Load the template and photos, then build a mosaic.
///
/// An empty photo list is rejected before any source is awaited. All loads
/// run concurrently behind one barrier; the first decode failure ends the
/// request and drops the loads still pending.
///
/// # Errors
///
/// Returns `MosaicError::EmptyPhotoPool` when `photos` is empty,
/// `MosaicError::Decode` when any source fails to load or decode, and any
/// error of [`render_mosaic`].
pub async fn generate_mosaic<T, I, F, R>(
    template: T,
    photos: I,
    config: &MosaicConfig,
    rng: &mut R,
) -> Result<Mosaic>
where
    T: Future<Output = std::result::Result<ImageSource, DecodeError>>,
    I: IntoIterator<Item = F>,
    F: Future<Output = std::result::Result<ImageSource, DecodeError>>,
    R: Rng + ?Sized,
{
    config.validate()?;

    let photos: Vec<F> = photos.into_iter().collect();
    if photos.is_empty() {
        log::warn!("Mosaic requested without photos");
        return Err(MosaicError::EmptyPhotoPool);
    }
    let photo_count = photos.len();

    let (template, photos) = try_join(resolve(template), resolve_all(photos))
        .await
        .inspect_err(|e| log::warn!("Failed to load mosaic inputs: {}", e))?;

    log::info!(
        "Decoded {}x{} template and {} photos",
        template.width(),
        template.height(),
        photo_count
    );

    let pool = PhotoPool::new(photos)?;
    render_mosaic(&template, &pool, config, rng)
}
