//! Rasterization and PNG encoding.
//!
//! The canvas starts filled with the configured [`Background`]. Each
//! pixel-map rectangle is filled with the identicon color via
//! `imageproc::drawing::draw_filled_rect_mut`. Rectangles are half-open
//! (bottom-right exclusive), so neighbouring cells tile without overlap.
//!
//! Encoding goes straight to an in-memory PNG buffer; writing it
//! anywhere is left to the caller.

use image::{ImageEncoder, Rgba};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::types::{Background, Dimensions, IdenticonError, PixelRect, Rgb, RgbaImage};

/// Draw the pixel map onto a fresh canvas.
///
/// # Panics
///
/// Panics if any rectangle extends past `dimensions`. The pixel mapper
/// never produces such a rectangle from a hash-derived grid, so this
/// signals a broken caller rather than bad input.
#[must_use = "returns the rasterized canvas"]
pub fn rasterize(
    pixel_map: &[PixelRect],
    color: Rgb,
    dimensions: Dimensions,
    background: Background,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(
        dimensions.width,
        dimensions.height,
        Rgba(background.to_rgba()),
    );
    let fill = Rgba(color.to_rgba());

    for rect in pixel_map {
        assert!(
            rect.fits_within(dimensions),
            "pixel rectangle {rect:?} lies outside the {}x{} canvas",
            dimensions.width,
            dimensions.height,
        );
        if rect.width() == 0 || rect.height() == 0 {
            continue;
        }
        let area = Rect::at(to_i32(rect.top_left.x), to_i32(rect.top_left.y))
            .of_size(rect.width(), rect.height());
        draw_filled_rect_mut(&mut canvas, area, fill);
    }

    canvas
}

/// Encode a canvas as PNG bytes.
///
/// # Errors
///
/// Returns [`IdenticonError::Encode`] if the PNG encoder fails.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, IdenticonError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(png_bytes)
}

/// Rasterize the pixel map and encode it as PNG.
///
/// # Errors
///
/// Returns [`IdenticonError::Encode`] if PNG encoding fails.
///
/// # Panics
///
/// Panics under the same conditions as [`rasterize`].
pub fn render(
    pixel_map: &[PixelRect],
    color: Rgb,
    dimensions: Dimensions,
    background: Background,
) -> Result<Vec<u8>, IdenticonError> {
    encode_png(&rasterize(pixel_map, color, dimensions, background))
}

/// Canvas coordinates are bounded by the maximum cell size, far below
/// `i32::MAX`.
fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
