//! hashicon-pipeline: Pure identicon generation pipeline (sans-IO).
//!
//! Turns an input string into a symmetric 5×5 identicon through:
//! hash -> color -> mirrored grid -> parity filter -> pixel map ->
//! rasterize + PNG encode.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! values and returns encoded bytes. Filesystem interaction lives in
//! `hashicon-io`.

pub mod color;
pub mod diagnostics;
pub mod filter;
pub mod grid;
pub mod hash;
pub mod pipeline;
pub mod pixel_map;
pub mod render;
pub mod types;

pub use color::pick_color;
pub use filter::filter_grid;
pub use grid::{build_grid, mirror_row};
pub use hash::{HashAlgorithm, Hasher, hash_to_bytes};
pub use pipeline::Pipeline;
pub use pixel_map::{build_pixel_map, build_pixel_map_with};
pub use render::{encode_png, rasterize, render};
pub use types::{
    Background, Cell, Dimensions, Grid, IdenticonConfig, IdenticonError, PixelRect, Point, Rgb,
    RgbaImage, StagedResult,
};

/// Run the full pipeline and return the encoded PNG.
///
/// # Pipeline steps
///
/// 1. Hash the input (MD5 by default)
/// 2. Pick the fill color from the first three hash bytes
/// 3. Build the mirrored 5×5 grid
/// 4. Drop odd-valued cells
/// 5. Map surviving cells to canvas rectangles
/// 6. Rasterize onto the background and encode as PNG
///
/// The same `input` and `config` always produce byte-identical output.
///
/// # Errors
///
/// Returns [`IdenticonError::InvalidConfig`] if `config.cell_size` is
/// out of range, or [`IdenticonError::Encode`] if encoding fails.
pub fn generate(input: &str, config: &IdenticonConfig) -> Result<Vec<u8>, IdenticonError> {
    let rendered = Pipeline::new(input, config.clone())
        .hash()
        .pick_color()?
        .build_grid()
        .filter()
        .map_pixels()
        .render()?;
    Ok(rendered.into_png())
}

/// Run the full pipeline, preserving every intermediate result.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_staged(
    input: &str,
    config: &IdenticonConfig,
) -> Result<StagedResult, IdenticonError> {
    use pipeline::PipelineStage;

    Pipeline::new(input, config.clone()).complete()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generate_is_deterministic() {
        let config = IdenticonConfig::default();
        let a = generate("apple", &config).unwrap();
        let b = generate("apple", &config).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn different_inputs_differ() {
        let config = IdenticonConfig::default();
        assert_ne!(
            generate("apple", &config).unwrap(),
            generate("ball", &config).unwrap()
        );
    }

    #[test]
    fn empty_input_is_valid() {
        let png = generate("", &IdenticonConfig::default()).unwrap();
        assert!(!png.is_empty());
    }

    #[test]
    fn hash_algorithm_changes_output() {
        let md5 = IdenticonConfig::default();
        let sip = IdenticonConfig {
            hash_algorithm: HashAlgorithm::SipHash13 { k0: 7, k1: 11 },
            ..IdenticonConfig::default()
        };
        assert_ne!(
            generate("apple", &md5).unwrap(),
            generate("apple", &sip).unwrap()
        );
    }

    #[test]
    fn staged_png_matches_generate() {
        let config = IdenticonConfig::default();
        let staged = generate_staged("apple", &config).unwrap();
        assert_eq!(staged.png, generate("apple", &config).unwrap());
    }

    #[test]
    fn apple_pixels_follow_the_grid() {
        let staged = generate_staged("apple", &IdenticonConfig::default()).unwrap();
        let color = staged.color.to_rgba();
        let white = Background::White.to_rgba();
        for cell in staged.grid.cells() {
            let x = (cell.index % 5) * 50 + 25;
            let y = (cell.index / 5) * 50 + 25;
            let expected = if cell.is_filled() { color } else { white };
            assert_eq!(
                staged.canvas.get_pixel(x, y).0,
                expected,
                "cell {} (value {})",
                cell.index,
                cell.value
            );
        }
    }

    #[test]
    fn canvas_is_left_right_symmetric() {
        let staged = generate_staged("mirror", &IdenticonConfig::default()).unwrap();
        let (w, h) = staged.canvas.dimensions();
        for y in 0..h {
            for x in 0..w / 2 {
                assert_eq!(
                    staged.canvas.get_pixel(x, y),
                    staged.canvas.get_pixel(w - 1 - x, y)
                );
            }
        }
    }
}
