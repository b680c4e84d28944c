//! Template analysis: from a stencil raster to a per-cell occupancy mask.
//!
//! A template is any raster whose silhouette marks where photos go. The
//! analyzer lays a [`CellGrid`] over it and decides, cell by cell, whether
//! the silhouette covers that cell.

mod analyze;
mod grid;
mod mask;

pub use analyze::{
    analyze, analyze_default, classify_sample, AnalyzeOptions, SampleThresholds, TemplateStyle,
};
pub use grid::{Cell, CellGrid};
pub use mask::OccupancyMask;
