//! Pixel mapping: place each grid cell on the canvas.
//!
//! A cell's column is `index % columns` and its row is
//! `index / columns`; the cell then covers a `cell_size` square starting
//! at `(col * cell_size, row * cell_size)`. The cell value plays no part.
//!
//! No bounds checking happens here. Keeping indices inside the canvas
//! is the caller's job; the rasterizer asserts it.

use crate::types::{GRID_COLUMNS, Grid, IdenticonConfig, PixelRect, Point};

/// Map every cell with the default cell size and column count.
#[must_use]
pub fn build_pixel_map(grid: &Grid) -> Vec<PixelRect> {
    build_pixel_map_with(grid, IdenticonConfig::DEFAULT_CELL_SIZE, GRID_COLUMNS)
}

/// Map every cell to its rectangle, preserving grid order.
///
/// `columns` must be non-zero.
#[must_use]
pub fn build_pixel_map_with(grid: &Grid, cell_size: u32, columns: u32) -> Vec<PixelRect> {
    debug_assert!(columns > 0, "pixel map needs at least one column");
    grid.cells()
        .iter()
        .map(|cell| {
            let col = cell.index % columns;
            let row = cell.index / columns;
            let left = col * cell_size;
            let top = row * cell_size;
            PixelRect::new(
                Point::new(left, top),
                Point::new(left + cell_size, top + cell_size),
            )
        })
        .collect()
}
