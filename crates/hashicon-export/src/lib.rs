//! hashicon-export: Pure format serializers (sans-IO)
//!
//! Converts a mapped identicon into vector output formats. Currently
//! supports SVG; PNG comes straight from `hashicon-pipeline`.

pub mod svg;

pub use svg::{SvgMetadata, to_svg};
