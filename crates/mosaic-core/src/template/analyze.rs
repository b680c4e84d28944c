//! Template silhouette detection.
//!
//! Each cell is classified from a single pixel at its center. Two rules
//! decide whether that pixel belongs to the silhouette:
//!
//! - **Alpha rule**: alpha above [`SampleThresholds::alpha`]. This is what
//!   separates a shape from a transparent background.
//! - **Luminance rule**: red, green and blue all below
//!   [`SampleThresholds::luminance`]. This finds a dark shape drawn on an
//!   opaque light background.
//!
//! The alpha rule is checked first. On a fully opaque template every sample
//! passes it, so opaque templates are classified by the luminance rule
//! instead; on a template with transparency the RGB under transparent pixels
//! carries no meaning and only the alpha rule applies. [`TemplateStyle::Auto`]
//! makes that call from the samples themselves.
//!
//! Sampling one pixel per cell keeps analysis at O(columns x rows). Thin or
//! anti-aliased strokes that miss a cell center leave the cell empty.

use serde::{Deserialize, Serialize};

use super::{CellGrid, OccupancyMask};
use crate::config::{DEFAULT_ALPHA_THRESHOLD, DEFAULT_LUMINANCE_THRESHOLD};
use crate::decode::RasterImage;
use crate::error::Result;

/// Channel thresholds for classifying a sampled pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SampleThresholds {
    /// A sample is filled when its alpha is strictly greater than this.
    pub alpha: u8,
    /// A sample is filled when red, green and blue are all strictly below this.
    pub luminance: u8,
}

impl Default for SampleThresholds {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA_THRESHOLD,
            luminance: DEFAULT_LUMINANCE_THRESHOLD,
        }
    }
}

impl SampleThresholds {
    #[inline]
    pub fn passes_alpha(&self, rgba: [u8; 4]) -> bool {
        rgba[3] > self.alpha
    }

    #[inline]
    pub fn passes_luminance(&self, rgba: [u8; 4]) -> bool {
        rgba[0] < self.luminance && rgba[1] < self.luminance && rgba[2] < self.luminance
    }
}

/// How a template encodes its silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateStyle {
    /// Decide from the sampled pixels: any transparency means `Alpha`,
    /// otherwise `Luminance`.
    #[default]
    Auto,
    /// Shape on a transparent background.
    Alpha,
    /// Dark shape on an opaque light background.
    Luminance,
}

impl TemplateStyle {
    /// Resolve `Auto` against the sampled pixels. Never returns `Auto`.
    pub fn resolve<'a>(self, samples: impl IntoIterator<Item = &'a [u8; 4]>) -> TemplateStyle {
        match self {
            TemplateStyle::Auto => {
                if samples.into_iter().any(|px| px[3] < u8::MAX) {
                    TemplateStyle::Alpha
                } else {
                    TemplateStyle::Luminance
                }
            }
            style => style,
        }
    }
}

/// Options for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeOptions {
    pub thresholds: SampleThresholds,
    pub style: TemplateStyle,
}

/// Classify one sampled pixel under a resolved style.
///
/// Rules are evaluated in order (alpha, then luminance) and the first match
/// wins; the style decides which of them can match.
#[inline]
pub fn classify_sample(rgba: [u8; 4], thresholds: &SampleThresholds, style: TemplateStyle) -> bool {
    let alpha_applies = style != TemplateStyle::Luminance;
    let luminance_applies = style != TemplateStyle::Alpha;

    if alpha_applies && thresholds.passes_alpha(rgba) {
        return true;
    }
    luminance_applies && thresholds.passes_luminance(rgba)
}

/// Compute the occupancy mask of `template` for a grid of `cell_size` cells.
///
/// Pure and deterministic: the same template and cell size always produce
/// the same mask.
///
/// # Errors
///
/// Returns `MosaicError::Decode` with `DecodeError::EmptyImage` for a
/// zero-dimension template and `MosaicError::InvalidConfig` for a zero cell size.
pub fn analyze(
    template: &RasterImage,
    cell_size: u32,
    options: &AnalyzeOptions,
) -> Result<OccupancyMask> {
    template.ensure_not_empty()?;
    let grid = CellGrid::for_raster(template, cell_size)?;

    // A center outside the raster yields no sample and leaves the cell empty
    let samples: Vec<Option<[u8; 4]>> = grid
        .cells()
        .map(|cell| {
            let (x, y) = cell.center();
            template.pixel(x, y)
        })
        .collect();

    let style = options.style.resolve(samples.iter().flatten());
    let filled: Vec<bool> = samples
        .iter()
        .map(|sample| sample.is_some_and(|px| classify_sample(px, &options.thresholds, style)))
        .collect();

    let mask = OccupancyMask::new(grid, style, filled);
    log::debug!(
        "Analyzed {}x{} template: {}x{} cells of {}px, {:?} style, {} filled",
        template.width(),
        template.height(),
        grid.columns(),
        grid.rows(),
        cell_size,
        style,
        mask.filled_count()
    );
    Ok(mask)
}

/// [`analyze`] with default thresholds and automatic style detection.
pub fn analyze_default(template: &RasterImage, cell_size: u32) -> Result<OccupancyMask> {
    analyze(template, cell_size, &AnalyzeOptions::default())
}
