//! Integration test: run "apple" through the pipeline and export to SVG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use hashicon_pipeline::{IdenticonConfig, generate_staged};

#[test]
fn apple_pipeline_to_svg() {
    let config = IdenticonConfig::default();
    let staged = generate_staged("apple", &config).expect("pipeline should succeed");

    let metadata = hashicon_export::SvgMetadata {
        title: Some("apple"),
        description: None,
    };
    let svg = hashicon_export::to_svg(
        &staged.pixel_map,
        staged.color,
        staged.dimensions,
        config.background,
        &metadata,
    );

    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("<title>apple</title>"));
    // Background plus one rect per drawn cell.
    assert_eq!(svg.matches("<rect").count(), staged.pixel_map.len() + 1);
    assert_eq!(svg.matches(r##"fill="#1f3870""##).count(), staged.pixel_map.len());
}
