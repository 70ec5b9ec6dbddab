//! Shared types for the hashicon generation pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;

/// Re-export `RgbaImage` so downstream crates can reference the
/// rasterized canvas without depending on `image` directly.
pub use image::RgbaImage;

/// Number of bytes produced by every [`HashAlgorithm`].
pub const HASH_LEN: usize = 16;

/// Number of hash bytes consumed per grid row before mirroring.
pub const CHUNK_SIZE: usize = 3;

/// Width of a mirrored row in cells (`2 * CHUNK_SIZE - 1`).
pub const GRID_COLUMNS: u32 = 5;

/// Number of full rows a [`HASH_LEN`]-byte hash produces.
pub const GRID_ROWS: u32 = 5;

/// A fill color taken verbatim from the first three hash bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as an opaque RGBA pixel.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    /// Formats as a lowercase CSS hex color, e.g. `#1f3870`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A single grid cell: a hash-derived value and its position in the
/// unfiltered grid.
///
/// `index` determines where the cell lands on the canvas; the parity of
/// `value` determines whether it is drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Byte value copied from the hash.
    pub value: u8,
    /// Zero-based position in the unfiltered, flattened grid.
    pub index: u32,
}

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(value: u8, index: u32) -> Self {
        Self { value, index }
    }

    /// Whether this cell is drawn (its value is even).
    #[must_use]
    pub const fn is_filled(self) -> bool {
        self.value & 1 == 0
    }
}

/// An ordered sequence of grid cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid(Vec<Cell>);

impl Grid {
    /// Create a new grid from a vector of cells.
    #[must_use]
    pub const fn new(cells: Vec<Cell>) -> Self {
        Self(cells)
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of cells in the grid.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    /// Consumes the grid and returns the underlying vector of cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A 2D point in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: u32,
    /// Vertical position (pixels from top edge).
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle on the canvas.
///
/// `top_left` is inclusive and `bottom_right` is exclusive, so two
/// horizontally adjacent cells share the coordinate `bottom_right.x ==
/// top_left.x` without overlapping pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    /// Upper-left corner (inclusive).
    pub top_left: Point,
    /// Lower-right corner (exclusive).
    pub bottom_right: Point,
}

impl PixelRect {
    /// Create a new rectangle from its corners.
    #[must_use]
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.bottom_right.x.saturating_sub(self.top_left.x)
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.bottom_right.y.saturating_sub(self.top_left.y)
    }

    /// Whether the rectangle lies entirely within a canvas of the given
    /// dimensions.
    #[must_use]
    pub const fn fits_within(&self, dimensions: Dimensions) -> bool {
        self.bottom_right.x <= dimensions.width && self.bottom_right.y <= dimensions.height
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Canvas fill applied before any cell is drawn.
///
/// Cells removed by the parity filter show this color in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Opaque white.
    #[default]
    White,
    /// Opaque black.
    Black,
    /// Fully transparent.
    Transparent,
}

impl Background {
    /// The background as an RGBA pixel.
    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        match self {
            Self::White => [255, 255, 255, 255],
            Self::Black => [0, 0, 0, 255],
            Self::Transparent => [0, 0, 0, 0],
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "white"),
            Self::Black => write!(f, "black"),
            Self::Transparent => write!(f, "transparent"),
        }
    }
}

/// Configuration for the identicon pipeline.
///
/// The grid shape is fixed by the hash length ([`GRID_COLUMNS`] ×
/// [`GRID_ROWS`]); only the cell size scales the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdenticonConfig {
    /// Which digest turns the input string into bytes.
    pub hash_algorithm: HashAlgorithm,

    /// Canvas fill behind the drawn cells.
    pub background: Background,

    /// Side length of one grid cell in pixels. Must be non-zero.
    pub cell_size: u32,
}

impl IdenticonConfig {
    /// Default side length of a grid cell in pixels.
    pub const DEFAULT_CELL_SIZE: u32 = 50;

    /// Default canvas background.
    pub const DEFAULT_BACKGROUND: Background = Background::White;

    /// Largest accepted cell size. The canvas tops out at 2560×2560
    /// (25 MiB of RGBA).
    pub const MAX_CELL_SIZE: u32 = 512;

    /// Canvas dimensions implied by `cell_size` and the fixed grid shape.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError::InvalidConfig`] if `cell_size` is zero
    /// or larger than [`MAX_CELL_SIZE`](Self::MAX_CELL_SIZE).
    pub fn canvas(&self) -> Result<Dimensions, IdenticonError> {
        if self.cell_size == 0 || self.cell_size > Self::MAX_CELL_SIZE {
            return Err(IdenticonError::InvalidConfig(format!(
                "cell_size must be between 1 and {}, got {}",
                Self::MAX_CELL_SIZE,
                self.cell_size
            )));
        }
        Ok(Dimensions {
            width: self.cell_size * GRID_COLUMNS,
            height: self.cell_size * GRID_ROWS,
        })
    }
}

impl Default for IdenticonConfig {
    fn default() -> Self {
        Self {
            hash_algorithm: HashAlgorithm::default(),
            background: Self::DEFAULT_BACKGROUND,
            cell_size: Self::DEFAULT_CELL_SIZE,
        }
    }
}

/// Result of running the pipeline with every intermediate preserved.
#[derive(Debug, Clone)]
pub struct StagedResult {
    /// The input string the identicon was derived from.
    pub input: String,
    /// Stage 1: hash digest.
    pub hash: [u8; HASH_LEN],
    /// Stage 2: fill color.
    pub color: Rgb,
    /// Stage 3: full mirrored grid.
    pub grid: Grid,
    /// Stage 4: even-valued cells only, original indices preserved.
    pub filtered: Grid,
    /// Stage 5: one rectangle per filtered cell.
    pub pixel_map: Vec<PixelRect>,
    /// Stage 6: the rasterized canvas.
    pub canvas: RgbaImage,
    /// Stage 6: the canvas encoded as PNG.
    pub png: Vec<u8>,
    /// Canvas dimensions in pixels.
    pub dimensions: Dimensions,
}

/// Errors that can occur during identicon generation.
#[derive(Debug, thiserror::Error)]
pub enum IdenticonError {
    /// The hash is too short to derive the requested value from.
    #[error("insufficient hash data: need at least {needed} bytes, got {actual}")]
    InsufficientData {
        /// Minimum number of bytes required.
        needed: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// Encoding the canvas failed.
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    /// Pipeline configuration is invalid.
    #[error("invalid identicon configuration: {0}")]
    InvalidConfig(String),
}
