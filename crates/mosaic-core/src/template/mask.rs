//! Per-cell occupancy produced by the template analyzer.

use super::{Cell, CellGrid, TemplateStyle};

/// Which cells of a [`CellGrid`] should receive a photo tile.
///
/// The mask owns the grid it was computed for, so the compositor always
/// paints with the same cell size the template was analyzed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMask {
    grid: CellGrid,
    style: TemplateStyle,
    /// Row-major, one entry per cell.
    filled: Vec<bool>,
}

impl OccupancyMask {
    pub(crate) fn new(grid: CellGrid, style: TemplateStyle, filled: Vec<bool>) -> Self {
        debug_assert_eq!(filled.len(), grid.cell_count(), "Mask size mismatch");
        Self {
            grid,
            style,
            filled,
        }
    }

    /// Build a mask by evaluating `f` for every cell in row-major order.
    ///
    /// Useful for callers that already know the silhouette, such as a
    /// hand-painted cell selection.
    pub fn from_fn(grid: CellGrid, f: impl FnMut(Cell) -> bool) -> Self {
        let filled = grid.cells().map(f).collect();
        Self::new(grid, TemplateStyle::Auto, filled)
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The style the template was classified with. `Auto` only for masks
    /// built with [`OccupancyMask::from_fn`].
    pub fn style(&self) -> TemplateStyle {
        self.style
    }

    /// Whether the cell at `(column, row)` is filled. Out-of-grid cells never are.
    pub fn is_filled(&self, column: u32, row: u32) -> bool {
        if column >= self.grid.columns() || row >= self.grid.rows() {
            return false;
        }
        self.filled
            .get(self.grid.index(column, row))
            .copied()
            .unwrap_or(false)
    }

    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.filled.contains(&true)
    }

    /// Every cell paired with its occupancy, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.grid.cells().zip(self.filled.iter().copied())
    }

    /// Filled cells only, row-major.
    pub fn filled_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.iter().filter_map(|(cell, filled)| filled.then_some(cell))
    }

    /// The mask as rows of booleans, top row first.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let columns = self.grid.columns() as usize;
        if columns == 0 {
            return vec![Vec::new(); self.grid.rows() as usize];
        }
        self.filled.chunks(columns).map(<[bool]>::to_vec).collect()
    }
}
