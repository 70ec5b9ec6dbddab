//! Incremental pipeline: advance stage-by-stage, inspecting each
//! intermediate result before continuing.
//!
//! Unlike [`crate::generate`] which runs the entire pipeline in one
//! call, [`Pipeline`] lets the caller drive execution one step at a time:
//!
//! ```rust
//! # use hashicon_pipeline::{IdenticonConfig, IdenticonError, Pipeline};
//! # fn run() -> Result<(), IdenticonError> {
//! let rendered = Pipeline::new("apple", IdenticonConfig::default())
//!     .hash()
//!     .pick_color()?
//!     .build_grid()
//!     .filter()
//!     .map_pixels()
//!     .render()?;
//!
//! assert!(!rendered.png().is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! Each stage method consumes `self` and returns the next pipeline state
//! (or `Result` for fallible stages), carrying every previously computed
//! field unchanged. Rendering before a grid exists is therefore a
//! compile-time error rather than a runtime check.

use crate::diagnostics::StageMetrics;
use crate::hash::Hasher;
use crate::types::{
    Dimensions, Grid, HASH_LEN, IdenticonConfig, IdenticonError, PixelRect, Rgb, RgbaImage,
    StagedResult,
};

// ───────────────────────── Stage 0: Pending ──────────────────────────

/// Pipeline state before any processing has occurred.
///
/// Call [`hash`](Self::hash) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing; call .hash() to continue"]
pub struct Pending {
    config: IdenticonConfig,
    input: String,
}

impl Pending {
    /// The input string.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Hash the input and advance to the [`Hashed`] stage.
    pub fn hash(self) -> Hashed {
        let hash = self.config.hash_algorithm.digest(self.input.as_bytes());
        Hashed {
            config: self.config,
            input: self.input,
            hash,
        }
    }
}

// ───────────────────────── Stage 1: Hashed ───────────────────────────

/// Pipeline state after hashing the input.
///
/// Call [`pick_color`](Self::pick_color) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing; call .pick_color() to continue"]
pub struct Hashed {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
}

impl Hashed {
    /// The hash digest.
    #[must_use]
    pub const fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    /// Pick the fill color and advance to the [`Colored`] stage.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError::InsufficientData`] if the digest is
    /// too short to supply a color.
    pub fn pick_color(self) -> Result<Colored, IdenticonError> {
        let color = crate::color::pick_color(&self.hash)?;
        Ok(Colored {
            config: self.config,
            input: self.input,
            hash: self.hash,
            color,
        })
    }
}

// ───────────────────────── Stage 2: Colored ──────────────────────────

/// Pipeline state after color selection.
///
/// Call [`build_grid`](Self::build_grid) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing; call .build_grid() to continue"]
pub struct Colored {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
    color: Rgb,
}

impl Colored {
    /// The fill color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Build the mirrored grid and advance to the [`Gridded`] stage.
    pub fn build_grid(self) -> Gridded {
        let grid = crate::grid::build_grid(&self.hash);
        Gridded {
            config: self.config,
            input: self.input,
            hash: self.hash,
            color: self.color,
            grid,
        }
    }
}

// ───────────────────────── Stage 3: Gridded ──────────────────────────

/// Pipeline state after grid construction.
///
/// Call [`filter`](Self::filter) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing; call .filter() to continue"]
pub struct Gridded {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
    color: Rgb,
    grid: Grid,
}

impl Gridded {
    /// The full, unfiltered grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Drop odd-valued cells and advance to the [`Filtered`] stage.
    ///
    /// The unfiltered grid is kept alongside the filtered one.
    pub fn filter(self) -> Filtered {
        let filtered = crate::filter::filter_grid(self.grid.clone());
        Filtered {
            config: self.config,
            input: self.input,
            hash: self.hash,
            color: self.color,
            grid: self.grid,
            filtered,
        }
    }
}

// ───────────────────────── Stage 4: Filtered ─────────────────────────

/// Pipeline state after the parity filter.
///
/// Call [`map_pixels`](Self::map_pixels) to advance to the next stage.
#[must_use = "pipeline stages are consumed by advancing; call .map_pixels() to continue"]
pub struct Filtered {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
    color: Rgb,
    grid: Grid,
    filtered: Grid,
}

impl Filtered {
    /// The cells that will be drawn.
    #[must_use]
    pub const fn filtered(&self) -> &Grid {
        &self.filtered
    }

    /// Map the filtered cells to rectangles and advance to the
    /// [`Mapped`] stage.
    pub fn map_pixels(self) -> Mapped {
        let pixel_map = crate::pixel_map::build_pixel_map_with(
            &self.filtered,
            self.config.cell_size,
            crate::types::GRID_COLUMNS,
        );
        Mapped {
            config: self.config,
            input: self.input,
            hash: self.hash,
            color: self.color,
            grid: self.grid,
            filtered: self.filtered,
            pixel_map,
        }
    }
}

// ───────────────────────── Stage 5: Mapped ───────────────────────────

/// Pipeline state after pixel mapping.
///
/// Call [`render`](Self::render) to advance to the final stage.
#[must_use = "pipeline stages are consumed by advancing; call .render() to continue"]
pub struct Mapped {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
    color: Rgb,
    grid: Grid,
    filtered: Grid,
    pixel_map: Vec<PixelRect>,
}

impl Mapped {
    /// One rectangle per filtered cell, in grid order.
    #[must_use]
    pub fn pixel_map(&self) -> &[PixelRect] {
        &self.pixel_map
    }

    /// Rasterize, encode, and advance to the [`Rendered`] stage.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError::InvalidConfig`] if the configured cell
    /// size is out of range, or [`IdenticonError::Encode`] if PNG
    /// encoding fails.
    pub fn render(self) -> Result<Rendered, IdenticonError> {
        let dimensions = self.config.canvas()?;
        let canvas = crate::render::rasterize(
            &self.pixel_map,
            self.color,
            dimensions,
            self.config.background,
        );
        let png = crate::render::encode_png(&canvas)?;
        Ok(Rendered {
            config: self.config,
            input: self.input,
            hash: self.hash,
            color: self.color,
            grid: self.grid,
            filtered: self.filtered,
            pixel_map: self.pixel_map,
            canvas,
            png,
            dimensions,
        })
    }
}

// ───────────────────────── Stage 6: Rendered ─────────────────────────

/// Pipeline state after rendering: the final stage.
///
/// Call [`into_result`](Self::into_result) to extract the
/// [`StagedResult`] containing all intermediates, or
/// [`into_png`](Self::into_png) for just the encoded bytes.
#[must_use = "call .into_result() to extract the StagedResult"]
pub struct Rendered {
    config: IdenticonConfig,
    input: String,
    hash: [u8; HASH_LEN],
    color: Rgb,
    grid: Grid,
    filtered: Grid,
    pixel_map: Vec<PixelRect>,
    canvas: RgbaImage,
    png: Vec<u8>,
    dimensions: Dimensions,
}

impl Rendered {
    /// The rasterized canvas.
    #[must_use]
    pub const fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// The encoded PNG bytes.
    #[must_use]
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Canvas dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The configuration the identicon was generated with.
    #[must_use]
    pub const fn config(&self) -> &IdenticonConfig {
        &self.config
    }

    /// Consume the pipeline and return only the PNG bytes.
    #[must_use]
    pub fn into_png(self) -> Vec<u8> {
        self.png
    }

    /// Consume the pipeline and return the full [`StagedResult`].
    #[must_use]
    pub fn into_result(self) -> StagedResult {
        StagedResult {
            input: self.input,
            hash: self.hash,
            color: self.color,
            grid: self.grid,
            filtered: self.filtered,
            pixel_map: self.pixel_map,
            canvas: self.canvas,
            png: self.png,
            dimensions: self.dimensions,
        }
    }
}

// ──────────────────── PipelineStage trait + Stage enum ────────────────

/// Total number of stages in the pipeline.
pub const STAGE_COUNT: usize = 7;

/// The output produced by a single pipeline stage.
///
/// Each variant borrows the data that the corresponding stage computed.
#[must_use]
pub enum StageOutput<'a> {
    /// The input string (not yet hashed).
    Input {
        /// The raw input.
        input: &'a str,
    },
    /// Hash digest.
    Hashed {
        /// The digest bytes.
        hash: &'a [u8; HASH_LEN],
    },
    /// Selected fill color.
    Colored {
        /// The color.
        color: Rgb,
    },
    /// Mirrored grid.
    Gridded {
        /// The unfiltered grid.
        grid: &'a Grid,
    },
    /// Parity-filtered grid.
    Filtered {
        /// The surviving cells.
        filtered: &'a Grid,
    },
    /// Pixel rectangles.
    Mapped {
        /// One rectangle per surviving cell.
        pixel_map: &'a [PixelRect],
    },
    /// Rendered canvas and encoded bytes.
    Rendered {
        /// The rasterized canvas.
        canvas: &'a RgbaImage,
        /// The PNG bytes.
        png: &'a [u8],
    },
}

/// Trait implemented by every pipeline stage, enabling uniform iteration.
///
/// # Loop pattern
///
/// ```rust
/// # use hashicon_pipeline::{IdenticonConfig, IdenticonError, Pipeline};
/// # use hashicon_pipeline::pipeline::{Advance, Stage};
/// # fn run() -> Result<(), IdenticonError> {
/// let mut stage: Stage = Pipeline::new("apple", IdenticonConfig::default()).into();
/// loop {
///     match stage.advance()? {
///         Advance::Next(next) => stage = next,
///         Advance::Complete(done) => { stage = done; break; }
///     }
/// }
/// let result = stage.complete()?;
/// # Ok(())
/// # }
/// ```
pub trait PipelineStage: Sized {
    /// Human-readable name of this stage (e.g. `"hash"`, `"grid"`).
    const NAME: &str;

    /// Zero-based index of this stage (`0` for Pending through `6` for
    /// Rendered).
    const INDEX: usize;

    /// The output this stage produced.
    fn output(&self) -> StageOutput<'_>;

    /// Stage-specific metrics for diagnostics.
    ///
    /// Returns `None` for the initial [`Pending`] stage.
    fn metrics(&self) -> Option<StageMetrics>;

    /// Advance to the next stage.
    ///
    /// Returns `Ok(Some(stage))` on success, `Ok(None)` if already at
    /// the final stage, or `Err` if the stage transition fails.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError`] if a fallible transition fails.
    fn next(self) -> Result<Option<Stage>, IdenticonError>;

    /// Run all remaining stages to completion and return the final
    /// [`StagedResult`].
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError`] if any remaining fallible stage fails.
    fn complete(self) -> Result<StagedResult, IdenticonError>;
}

impl PipelineStage for Pending {
    const NAME: &str = "input";
    const INDEX: usize = 0;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Input { input: &self.input }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        None
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Hashed(self.hash())))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.hash().complete()
    }
}

impl PipelineStage for Hashed {
    const NAME: &str = "hash";
    const INDEX: usize = 1;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Hashed { hash: &self.hash }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::Hash {
            algorithm: self.config.hash_algorithm.name().to_owned(),
            input_bytes: self.input.len(),
            digest: hex::encode(self.hash),
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Colored(self.pick_color()?)))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.pick_color()?.complete()
    }
}

impl PipelineStage for Colored {
    const NAME: &str = "color";
    const INDEX: usize = 2;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Colored { color: self.color }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::Color {
            color: self.color.to_string(),
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Gridded(self.build_grid())))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.build_grid().complete()
    }
}

impl PipelineStage for Gridded {
    const NAME: &str = "grid";
    const INDEX: usize = 3;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Gridded { grid: &self.grid }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::Grid {
            row_count: self.grid.len() / crate::types::GRID_COLUMNS as usize,
            cell_count: self.grid.len(),
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Filtered(self.filter())))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.filter().complete()
    }
}

impl PipelineStage for Filtered {
    const NAME: &str = "filter";
    const INDEX: usize = 4;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Filtered {
            filtered: &self.filtered,
        }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::Filter {
            cells_before: self.grid.len(),
            cells_after: self.filtered.len(),
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Mapped(self.map_pixels())))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.map_pixels().complete()
    }
}

impl PipelineStage for Mapped {
    const NAME: &str = "pixel_map";
    const INDEX: usize = 5;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Mapped {
            pixel_map: &self.pixel_map,
        }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::PixelMap {
            rect_count: self.pixel_map.len(),
            cell_size: self.config.cell_size,
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(Some(Stage::Rendered(self.render()?)))
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        self.render()?.complete()
    }
}

impl PipelineStage for Rendered {
    const NAME: &str = "render";
    const INDEX: usize = 6;

    fn output(&self) -> StageOutput<'_> {
        StageOutput::Rendered {
            canvas: &self.canvas,
            png: &self.png,
        }
    }

    fn metrics(&self) -> Option<StageMetrics> {
        Some(StageMetrics::Render {
            width: self.dimensions.width,
            height: self.dimensions.height,
            background: self.config.background.to_string(),
            png_bytes: self.png.len(),
        })
    }

    fn next(self) -> Result<Option<Stage>, IdenticonError> {
        Ok(None)
    }

    fn complete(self) -> Result<StagedResult, IdenticonError> {
        Ok(self.into_result())
    }
}

/// Enum wrapping all pipeline stages for uniform, loopable access.
///
/// Use [`From`] conversions to enter the dynamic API from any typed
/// stage, then call [`advance`](Self::advance) in a loop.
#[must_use]
pub enum Stage {
    /// See [`Pending`].
    Pending(Pending),
    /// See [`Hashed`].
    Hashed(Hashed),
    /// See [`Colored`].
    Colored(Colored),
    /// See [`Gridded`].
    Gridded(Gridded),
    /// See [`Filtered`].
    Filtered(Filtered),
    /// See [`Mapped`].
    Mapped(Mapped),
    /// See [`Rendered`].
    Rendered(Rendered),
}

/// Compile-time guard: if a [`Stage`] variant is added, this match becomes
/// non-exhaustive and the build fails, reminding you to bump [`STAGE_COUNT`].
#[allow(dead_code, clippy::match_same_arms)]
const fn _stage_count_guard(s: &Stage) {
    match s {
        Stage::Pending(_)
        | Stage::Hashed(_)
        | Stage::Colored(_)
        | Stage::Gridded(_)
        | Stage::Filtered(_)
        | Stage::Mapped(_)
        | Stage::Rendered(_) => {}
    }
}

/// Result of [`Stage::advance`]: either the next stage or the
/// completed final stage returned unchanged.
#[must_use]
pub enum Advance {
    /// The pipeline advanced to this next stage.
    Next(Stage),
    /// The pipeline was already at the final stage and is returned unchanged.
    Complete(Stage),
}

/// Delegate a method call to whichever `Stage` variant is active.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        match $self {
            Self::Pending(s) => s.$method($($arg),*),
            Self::Hashed(s) => s.$method($($arg),*),
            Self::Colored(s) => s.$method($($arg),*),
            Self::Gridded(s) => s.$method($($arg),*),
            Self::Filtered(s) => s.$method($($arg),*),
            Self::Mapped(s) => s.$method($($arg),*),
            Self::Rendered(s) => s.$method($($arg),*),
        }
    };
}

impl Stage {
    /// Human-readable name of the current stage.
    #[must_use]
    pub fn name(&self) -> &'static str {
        delegate!(self, name)
    }

    /// Zero-based index of the current stage.
    #[must_use]
    pub fn index(&self) -> usize {
        delegate!(self, index)
    }

    /// The output this stage produced.
    pub fn output(&self) -> StageOutput<'_> {
        delegate!(self, output)
    }

    /// Stage-specific metrics for diagnostics.
    #[must_use]
    pub fn metrics(&self) -> Option<StageMetrics> {
        delegate!(self, metrics)
    }

    /// Whether the pipeline is at the final stage.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// Advance to the next stage.
    ///
    /// Returns `Ok(Some(next_stage))` on success, `Ok(None)` if
    /// already complete (the `Rendered` value is consumed), or `Err` if
    /// the transition fails.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError`] if a fallible stage transition fails.
    pub fn next(self) -> Result<Option<Self>, IdenticonError> {
        delegate!(self, next)
    }

    /// Advance to the next stage, returning `self` unchanged if
    /// already complete.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError`] if a fallible stage transition fails.
    pub fn advance(self) -> Result<Advance, IdenticonError> {
        if self.is_complete() {
            return Ok(Advance::Complete(self));
        }
        // The is_complete() guard above ensures next() yields Some here.
        #[allow(clippy::unreachable)]
        let next = self
            .next()?
            .unwrap_or_else(|| unreachable!("non-complete stage returned None from next()"));
        Ok(Advance::Next(next))
    }

    /// Run all remaining stages to completion.
    ///
    /// # Errors
    ///
    /// Returns [`IdenticonError`] if any remaining fallible stage fails.
    pub fn complete(self) -> Result<StagedResult, IdenticonError> {
        delegate!(self, complete)
    }
}

// The `PipelineStage` associated constants aren't callable via
// `self.NAME`, so the macro goes through this helper instead.
trait StageMetadata {
    fn name(&self) -> &'static str;
    fn index(&self) -> usize;
}

impl<T: PipelineStage> StageMetadata for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn index(&self) -> usize {
        T::INDEX
    }
}

impl From<Pending> for Stage {
    fn from(s: Pending) -> Self {
        Self::Pending(s)
    }
}

impl From<Hashed> for Stage {
    fn from(s: Hashed) -> Self {
        Self::Hashed(s)
    }
}

impl From<Colored> for Stage {
    fn from(s: Colored) -> Self {
        Self::Colored(s)
    }
}

impl From<Gridded> for Stage {
    fn from(s: Gridded) -> Self {
        Self::Gridded(s)
    }
}

impl From<Filtered> for Stage {
    fn from(s: Filtered) -> Self {
        Self::Filtered(s)
    }
}

impl From<Mapped> for Stage {
    fn from(s: Mapped) -> Self {
        Self::Mapped(s)
    }
}

impl From<Rendered> for Stage {
    fn from(s: Rendered) -> Self {
        Self::Rendered(s)
    }
}

// ───────────────────── Pipeline entry point ──────────────────────────

/// Incremental identicon pipeline.
///
/// Created via [`Pipeline::new`], which stores the input and config
/// without doing any processing. Each stage method consumes the current
/// state and returns the next, making it a compile-time error to skip
/// stages or call them out of order.
pub struct Pipeline;

impl Pipeline {
    /// Create a new pipeline for `input`.
    #[allow(clippy::new_ret_no_self)]
    pub fn new(input: impl Into<String>, config: IdenticonConfig) -> Pending {
        Pending {
            config,
            input: input.into(),
        }
    }
}
