//! End-to-end: input string to identicon file on disk.

#![allow(clippy::unwrap_used)]

use hashicon_io::{OutputFormat, create, save_as};
use hashicon_pipeline::{IdenticonConfig, generate_staged};

#[test_log::test]
fn apple_file_matches_reference_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = create("apple", dir.path(), &IdenticonConfig::default()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let image = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (250, 250));

    // Row 0 of "apple" mirrors to [31, 56, 112, 56, 31]; the odd outer cells stay blank.
    assert_eq!(image.get_pixel(75, 25).0, [31, 56, 112, 255]);
    assert_eq!(image.get_pixel(125, 25).0, [31, 56, 112, 255]);
    assert_eq!(image.get_pixel(25, 25).0, [255, 255, 255, 255]);
}

#[test_log::test]
fn many_inputs_share_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = IdenticonConfig::default();
    for input in ["apple", "ball", "", "名前"] {
        let path = create(input, dir.path(), &config).unwrap();
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("{input}.png"));
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test_log::test]
fn png_and_svg_live_side_by_side() {
    let dir = tempfile::tempdir().unwrap();
    let staged = generate_staged("apple", &IdenticonConfig::default()).unwrap();
    save_as(&staged.png, "apple", OutputFormat::Png, dir.path()).unwrap();
    save_as(b"<svg/>", "apple", OutputFormat::Svg, dir.path()).unwrap();
    assert!(dir.path().join("apple.png").is_file());
    assert!(dir.path().join("apple.svg").is_file());
}
