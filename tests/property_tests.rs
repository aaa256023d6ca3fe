use gallery_squeeze::{is_image_file, target_dimensions, CompressionOptions, OutputNaming};
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn oversized_images_get_long_edge_equal_to_max(
        width in 1u32..=20_000u32,
        height in 1u32..=20_000u32,
        max_dimension in 1u32..=4_000u32,
    ) {
        prop_assume!(width.max(height) > max_dimension);

        let (new_w, new_h) = target_dimensions(width, height, max_dimension);

        prop_assert_eq!(new_w.max(new_h), max_dimension);
        prop_assert!(new_w >= 1 && new_h >= 1);
        prop_assert!(new_w <= width && new_h <= height);
    }

    #[test]
    fn downsampling_preserves_aspect_ratio(
        width in 100u32..=20_000u32,
        height in 100u32..=20_000u32,
        max_dimension in 100u32..=4_000u32,
    ) {
        prop_assume!(width.max(height) > max_dimension);

        let (new_w, new_h) = target_dimensions(width, height, max_dimension);
        let scale = max_dimension as f64 / width.max(height) as f64;

        // The short edge is rounded, so it may be off by at most half a pixel.
        let expected_short = width.min(height) as f64 * scale;
        let new_short = new_w.min(new_h);
        prop_assert!((new_short as f64 - expected_short).abs() <= 0.5 + 1e-9 || new_short == 1);

        if width >= height {
            prop_assert!(new_w >= new_h);
        }
        if width <= height {
            prop_assert!(new_w <= new_h);
        }
    }

    #[test]
    fn images_within_bounds_pass_through(
        max_dimension in 1u32..=4_000u32,
        width_frac in 0.0f64..=1.0,
        height_frac in 0.0f64..=1.0,
    ) {
        let width = ((max_dimension as f64 * width_frac) as u32).max(1);
        let height = ((max_dimension as f64 * height_frac) as u32).max(1);

        prop_assert_eq!(target_dimensions(width, height, max_dimension), (width, height));
    }

    #[test]
    fn target_dimensions_is_idempotent(
        width in 1u32..=20_000u32,
        height in 1u32..=20_000u32,
        max_dimension in 1u32..=4_000u32,
    ) {
        let (w1, h1) = target_dimensions(width, height, max_dimension);
        prop_assert_eq!(target_dimensions(w1, h1, max_dimension), (w1, h1));
    }

    #[test]
    fn quality_range_is_validated(quality in 0u8..=255u8) {
        let result = CompressionOptions::new(None, Some(quality), OutputNaming::KeepOriginal);
        prop_assert_eq!(result.is_ok(), quality <= 100);
    }

    #[test]
    fn is_image_file_recognizes_extensions(
        stem in "[a-zA-Z0-9_-]{1,12}",
        extension in prop::sample::select(&["jpg", "JPG", "jpeg", "png", "PNG", "webp", "WebP", "gif", "bmp", "txt", "tiff"]),
    ) {
        let filename = format!("{}.{}", stem, extension);
        let expected = matches!(extension.to_lowercase().as_str(), "jpg" | "jpeg" | "png" | "webp");
        prop_assert_eq!(is_image_file(Path::new(&filename)), expected);
    }
}
