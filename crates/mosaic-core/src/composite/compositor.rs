//! Painting photo tiles into the occupied cells of the output raster.
//!
//! Compositing runs in three steps:
//!
//! 1. **Plan**: walk the cells row-major and draw a photo for every filled
//!    cell from the injected RNG. All randomness happens here, so a seeded
//!    RNG fixes the whole cell-to-photo assignment.
//! 2. **Prepare**: stretch each distinct (photo, tile size) pair once.
//! 3. **Paint**: copy tile rows into the transparent output. Every output
//!    pixel row is written by exactly one worker, so rows can be painted in
//!    parallel without locks and the result does not depend on scheduling.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::PhotoPool;
use crate::config::{DEFAULT_MAX_OUTPUT_PIXELS, DEFAULT_OUTPUT_SCALE};
use crate::decode::{stretch, FilterType, RasterImage, CHANNELS};
use crate::error::{MosaicError, Result};
use crate::template::{CellGrid, OccupancyMask};

/// Options for [`composite`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeOptions {
    /// Output pixels per template pixel.
    pub output_scale: f32,
    /// Filter used to stretch photos into cells.
    pub filter: FilterType,
    /// Upper bound on output pixels; larger requests fail to allocate.
    pub max_output_pixels: u64,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            output_scale: DEFAULT_OUTPUT_SCALE,
            filter: FilterType::default(),
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

/// How output rows are distributed over threads.
///
/// Both modes write identical bytes. Without the `parallel` feature,
/// `Parallel` paints sequentially as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    Sequential,
    Parallel,
}

impl Default for PaintMode {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            PaintMode::Parallel
        } else {
            PaintMode::Sequential
        }
    }
}

/// Where one photo was painted, in output pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePlacement {
    pub column: u32,
    pub row: u32,
    /// Index into the photo pool.
    pub photo: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The finished mosaic raster and the tile assignment that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRaster {
    raster: RasterImage,
    placements: Vec<TilePlacement>,
}

impl CompositeRaster {
    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.raster.pixels()
    }

    /// One entry per filled cell, row-major.
    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }
}

/// Compute the output raster size for a grid at `scale`.
///
/// # Errors
///
/// Returns `MosaicError::RasterAllocation` for a non-finite or non-positive
/// scale, a zero-size result, or more than `max_pixels` pixels.
pub fn output_dimensions(grid: &CellGrid, scale: f32, max_pixels: u64) -> Result<(u32, u32)> {
    let scale = scale as f64;
    let width = (grid.source_width() as f64 * scale).round();
    let height = (grid.source_height() as f64 * scale).round();

    let fail = |reason: &str| MosaicError::RasterAllocation {
        width: if width.is_finite() { width as u64 } else { 0 },
        height: if height.is_finite() { height as u64 } else { 0 },
        reason: reason.to_string(),
    };

    if !scale.is_finite() || scale <= 0.0 {
        return Err(fail("output scale must be a positive finite number"));
    }
    if width < 1.0 || height < 1.0 {
        return Err(fail("output would have zero width or height"));
    }
    if width > u32::MAX as f64 || height > u32::MAX as f64 {
        return Err(fail("output dimensions overflow"));
    }
    if width * height > max_pixels as f64 {
        return Err(fail(&format!("output exceeds the {} pixel limit", max_pixels)));
    }

    Ok((width as u32, height as u32))
}

/// Output coordinate of the grid line `index` cells from the origin.
#[inline]
fn scaled_edge(index: u32, cell_size: u32, scale: f64, limit: u32) -> u32 {
    let edge = (index as f64 * cell_size as f64 * scale).round();
    (edge as u32).min(limit)
}

/// Draw a photo for every filled cell and compute its output rectangle.
///
/// Cells are visited row-major and the RNG is consulted once per filled cell,
/// so the assignment depends only on the mask, the pool size and the RNG state.
pub fn plan_tiles<R: Rng + ?Sized>(
    mask: &OccupancyMask,
    photos: &PhotoPool,
    output: (u32, u32),
    scale: f32,
    rng: &mut R,
) -> Vec<TilePlacement> {
    let grid = mask.grid();
    let scale = scale as f64;
    let (out_width, out_height) = output;

    mask.filled_cells()
        .map(|cell| {
            let left = scaled_edge(cell.column, grid.cell_size(), scale, out_width);
            let right = scaled_edge(cell.column + 1, grid.cell_size(), scale, out_width);
            let top = scaled_edge(cell.row, grid.cell_size(), scale, out_height);
            let bottom = scaled_edge(cell.row + 1, grid.cell_size(), scale, out_height);
            TilePlacement {
                column: cell.column,
                row: cell.row,
                photo: photos.pick(rng),
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            }
        })
        .collect()
}

type TileKey = (usize, u32, u32);

/// Stretch each distinct (photo, width, height) once.
fn prepare_tiles(
    placements: &[TilePlacement],
    photos: &PhotoPool,
    filter: FilterType,
) -> Result<HashMap<TileKey, RasterImage>> {
    let keys: Vec<TileKey> = placements
        .iter()
        .filter(|p| p.width > 0 && p.height > 0)
        .map(|p| (p.photo, p.width, p.height))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let build = |&(photo, width, height): &TileKey| -> Result<(TileKey, RasterImage)> {
        let source = photos.get(photo).ok_or(MosaicError::EmptyPhotoPool)?;
        let tile = stretch(source, width, height, filter)?;
        Ok(((photo, width, height), tile))
    };

    #[cfg(feature = "parallel")]
    let tiles = keys.par_iter().map(build).collect();
    #[cfg(not(feature = "parallel"))]
    let tiles = keys.iter().map(build).collect();

    tiles
}

/// Allocate a zeroed (fully transparent) RGBA buffer.
fn allocate_transparent(width: u32, height: u32) -> Result<Vec<u8>> {
    let fail = |reason: String| MosaicError::RasterAllocation {
        width: width as u64,
        height: height as u64,
        reason,
    };

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(CHANNELS))
        .ok_or_else(|| fail("buffer size overflows".to_string()))?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|e| fail(e.to_string()))?;
    pixels.resize(len, 0);
    Ok(pixels)
}

/// Placements grouped by cell row, with the output pixel rows each band spans.
struct Band<'a> {
    top: u32,
    bottom: u32,
    placements: Vec<&'a TilePlacement>,
}

fn bands(placements: &[TilePlacement]) -> Vec<Band<'_>> {
    let mut bands: Vec<Band<'_>> = Vec::new();
    for placement in placements.iter().filter(|p| p.width > 0 && p.height > 0) {
        match bands.last_mut() {
            Some(band) if band.top == placement.y => band.placements.push(placement),
            _ => bands.push(Band {
                top: placement.y,
                bottom: placement.y + placement.height,
                placements: vec![placement],
            }),
        }
    }
    bands
}

/// Copy the slice of every tile that crosses output row `y` into `row`.
fn paint_row(
    y: u32,
    row: &mut [u8],
    band_of_row: &[Option<usize>],
    bands: &[Band<'_>],
    tiles: &HashMap<TileKey, RasterImage>,
) {
    let Some(band) = band_of_row.get(y as usize).copied().flatten().and_then(|b| bands.get(b))
    else {
        return;
    };
    let ty = (y - band.top) as usize;

    for placement in &band.placements {
        let Some(tile) = tiles.get(&(placement.photo, placement.width, placement.height)) else {
            continue;
        };
        let span = placement.width as usize * CHANNELS;
        let src_start = ty * span;
        let dst_start = placement.x as usize * CHANNELS;

        if let (Some(src), Some(dst)) = (
            tile.pixels().get(src_start..src_start + span),
            row.get_mut(dst_start..dst_start + span),
        ) {
            dst.copy_from_slice(src);
        }
    }
}

/// Run [`paint_row`] over every output row of `pixels`.
fn paint(
    pixels: &mut [u8],
    row_len: usize,
    mode: PaintMode,
    band_of_row: &[Option<usize>],
    bands: &[Band<'_>],
    tiles: &HashMap<TileKey, RasterImage>,
) {
    let paint = |(y, row): (usize, &mut [u8])| paint_row(y as u32, row, band_of_row, bands, tiles);

    #[cfg(feature = "parallel")]
    if mode == PaintMode::Parallel {
        pixels.par_chunks_mut(row_len).enumerate().for_each(paint);
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = mode;

    pixels.chunks_mut(row_len).enumerate().for_each(paint);
}

/// Paint a photo tile into every filled cell of `mask`.
///
/// The output is `round(template * output_scale)` on each axis and starts
/// fully transparent. Each filled cell receives a photo drawn uniformly at
/// random (with replacement) from `photos`, stretched to exactly cover the
/// cell regardless of the photo's aspect ratio. Unfilled cells and the strip
/// outside the grid keep alpha 0. Pixels are copied, not blended.
///
/// # Errors
///
/// Returns `MosaicError::RasterAllocation` if the output cannot be sized or
/// allocated. A grid without cells is not an error: the result is simply
/// transparent.
pub fn composite<R: Rng + ?Sized>(
    mask: &OccupancyMask,
    photos: &PhotoPool,
    options: &CompositeOptions,
    rng: &mut R,
) -> Result<CompositeRaster> {
    composite_with_mode(mask, photos, options, rng, PaintMode::default())
}

/// [`composite`] with an explicit [`PaintMode`], e.g. `Sequential` when the
/// caller already runs inside a thread pool.
pub fn composite_with_mode<R: Rng + ?Sized>(
    mask: &OccupancyMask,
    photos: &PhotoPool,
    options: &CompositeOptions,
    rng: &mut R,
    mode: PaintMode,
) -> Result<CompositeRaster> {
    let (width, height) =
        output_dimensions(mask.grid(), options.output_scale, options.max_output_pixels)?;
    let mut pixels = allocate_transparent(width, height)?;

    let placements = plan_tiles(mask, photos, (width, height), options.output_scale, rng);
    let tiles = prepare_tiles(&placements, photos, options.filter)?;

    let bands = bands(&placements);
    let mut band_of_row = vec![None; height as usize];
    for (index, band) in bands.iter().enumerate() {
        for slot in band_of_row
            .iter_mut()
            .take(band.bottom as usize)
            .skip(band.top as usize)
        {
            *slot = Some(index);
        }
    }

    let row_len = width as usize * CHANNELS;
    paint(&mut pixels, row_len, mode, &band_of_row, &bands, &tiles);

    log::debug!(
        "Composited {} tiles ({} distinct) from {} photos into {}x{} raster",
        placements.len(),
        tiles.len(),
        photos.len(),
        width,
        height
    );

    Ok(CompositeRaster {
        raster: RasterImage::new(width, height, pixels)?,
        placements,
    })
}
