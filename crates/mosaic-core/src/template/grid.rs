//! Uniform square grid laid over a raster.

use crate::decode::RasterImage;
use crate::error::{MosaicError, Result};

/// A uniform grid of `cell_size` squares covering the top-left of a raster.
///
/// `columns = floor(width / cell_size)` and `rows = floor(height / cell_size)`.
/// The strip on the right and bottom that does not fit a whole cell is not
/// covered by any cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGrid {
    source_width: u32,
    source_height: u32,
    cell_size: u32,
    columns: u32,
    rows: u32,
}

/// One square of a [`CellGrid`], in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl Cell {
    /// The single pixel sampled to classify this cell.
    #[inline]
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.size / 2, self.y + self.size / 2)
    }
}

impl CellGrid {
    /// Build the grid for a `width x height` raster.
    ///
    /// # Errors
    ///
    /// Returns `MosaicError::InvalidConfig` if `cell_size` is zero.
    pub fn new(source_width: u32, source_height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(MosaicError::InvalidConfig(
                "cell size must be a positive number of pixels".to_string(),
            ));
        }
        Ok(Self {
            source_width,
            source_height,
            cell_size,
            columns: source_width / cell_size,
            rows: source_height / cell_size,
        })
    }

    /// Build the grid for a raster's dimensions.
    pub fn for_raster(raster: &RasterImage, cell_size: u32) -> Result<Self> {
        Self::new(raster.width(), raster.height(), cell_size)
    }

    pub fn source_width(&self) -> u32 {
        self.source_width
    }

    pub fn source_height(&self) -> u32 {
        self.source_height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of the region covered by whole cells.
    pub fn covered_width(&self) -> u32 {
        self.columns * self.cell_size
    }

    /// Height of the region covered by whole cells.
    pub fn covered_height(&self) -> u32 {
        self.rows * self.cell_size
    }

    /// The cell at `(column, row)`, or `None` outside the grid.
    pub fn cell(&self, column: u32, row: u32) -> Option<Cell> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(Cell {
            column,
            row,
            x: column * self.cell_size,
            y: row * self.cell_size,
            size: self.cell_size,
        })
    }

    /// Row-major index of `(column, row)`.
    #[inline]
    pub(crate) fn index(&self, column: u32, row: u32) -> usize {
        row as usize * self.columns as usize + column as usize
    }

    /// All cells in row-major order: row 0 first, columns left to right.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).filter_map(move |column| self.cell(column, row))
        })
    }
}
