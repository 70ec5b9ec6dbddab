//! SVG export serializer.
//!
//! Converts a pixel map into an SVG string with one `<rect>` per drawn
//! cell, using the [`svg`] crate for document construction and XML
//! escaping. The document uses the canvas pixel size as its `viewBox`,
//! so the vector output lines up exactly with the PNG rendering.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text;
use svg::node::element::{Description, Rectangle, Title};

use hashicon_pipeline::{Background, Dimensions, PixelRect, Rgb};

/// Metadata to embed in the SVG document.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    ///
    /// Typically the input string the identicon was derived from.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,
}

/// Background fill as an SVG color, or `None` when nothing should be
/// painted.
const fn background_fill(background: Background) -> Option<&'static str> {
    match background {
        Background::White => Some("#ffffff"),
        Background::Black => Some("#000000"),
        Background::Transparent => None,
    }
}

/// Serialize a pixel map into an SVG document string.
///
/// Emits, in order: the optional `<title>` and `<desc>`, a full-canvas
/// background `<rect>` (omitted for [`Background::Transparent`]), then
/// one `<rect>` per entry of `pixel_map` filled with `color`.
/// Zero-area rectangles are skipped.
///
/// # Examples
///
/// ```
/// use hashicon_pipeline::{Background, Dimensions, PixelRect, Point, Rgb};
/// use hashicon_export::{SvgMetadata, to_svg};
///
/// let map = [PixelRect::new(Point::new(0, 0), Point::new(50, 50))];
/// let svg = to_svg(
///     &map,
///     Rgb::new(31, 56, 112),
///     Dimensions { width: 250, height: 250 },
///     Background::Transparent,
///     &SvgMetadata::default(),
/// );
/// assert!(svg.contains(r##"fill="#1f3870""##));
/// ```
#[must_use]
pub fn to_svg(
    pixel_map: &[PixelRect],
    color: Rgb,
    dimensions: Dimensions,
    background: Background,
    metadata: &SvgMetadata<'_>,
) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h))
        .set("shape-rendering", "crispEdges");

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(fill) = background_fill(background) {
        doc = doc.add(
            Rectangle::new()
                .set("width", w)
                .set("height", h)
                .set("fill", fill),
        );
    }

    let fill = color.to_string();
    for rect in pixel_map {
        if rect.width() == 0 || rect.height() == 0 {
            continue;
        }
        doc = doc.add(
            Rectangle::new()
                .set("x", rect.top_left.x)
                .set("y", rect.top_left.y)
                .set("width", rect.width())
                .set("height", rect.height())
                .set("fill", fill.as_str()),
        );
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
