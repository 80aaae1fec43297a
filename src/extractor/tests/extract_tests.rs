//! Tests for plain region extraction

use image::imageops;

use super::test_utils::{create_test_page, is_transparent, nine_patch_region};
use crate::atlas::errors::AtlasError;
use crate::atlas::types::Region;
use crate::extractor::extract;
use crate::extractor::rotation::rotate_quarter_counter_clockwise;

#[test]
fn test_unrotated_region_is_exact_crop() {
    let page = create_test_page(32, 32);
    let region = Region::new("icon", 0, 5, 7, 6, 4);

    let image = extract(&page, &region, 0).unwrap();
    let expected = imageops::crop_imm(&page, 5, 7, 6, 4).to_image();
    assert_eq!(image.dimensions(), (6, 4));
    assert_eq!(image, expected);
}

#[test]
fn test_rotated_region_restores_orientation() {
    let page = create_test_page(32, 32);
    let mut region = Region::new("tall", 0, 2, 3, 5, 3);
    region.rotate = true;

    let image = extract(&page, &region, 0).unwrap();
    assert_eq!(image.dimensions(), (5, 3));

    // The page stores the rectangle as 3 wide and 5 tall
    let stored = imageops::crop_imm(&page, 2, 3, 3, 5).to_image();
    assert_eq!(rotate_quarter_counter_clockwise(&image), stored);
}

#[test]
fn test_rotated_region_pixel_mapping() {
    let page = create_test_page(16, 16);
    let mut region = Region::new("r", 0, 0, 0, 4, 2);
    region.rotate = true;

    let image = extract(&page, &region, 0).unwrap();
    // Stored (x, y) ends up at (width - 1 - y, x)
    for y in 0..4 {
        for x in 0..2 {
            assert_eq!(image.get_pixel(4 - 1 - y, x), page.get_pixel(x, y));
        }
    }
}

#[test]
fn test_whitespace_reconstruction() {
    let page = create_test_page(32, 32);
    let mut region = Region::new("stripped", 0, 8, 9, 4, 4);
    region.original_width = 10;
    region.original_height = 10;
    region.offset_x = 3;
    region.offset_y = 2;

    let image = extract(&page, &region, 0).unwrap();
    assert_eq!(image.dimensions(), (10, 10));

    for y in 0..10 {
        for x in 0..10 {
            let pixel = image.get_pixel(x, y);
            if (3..7).contains(&x) && (4..8).contains(&y) {
                assert_eq!(pixel, page.get_pixel(8 + x - 3, 9 + y - 4));
            } else {
                assert!(is_transparent(pixel), "pixel ({}, {}) should be transparent", x, y);
            }
        }
    }
}

#[test]
fn test_rotated_and_stripped_region() {
    let page = create_test_page(32, 32);
    let mut region = Region::new("both", 0, 0, 0, 3, 2);
    region.rotate = true;
    region.original_width = 5;
    region.original_height = 6;
    region.offset_x = 1;
    region.offset_y = 0;

    let image = extract(&page, &region, 0).unwrap();
    assert_eq!(image.dimensions(), (5, 6));

    // Zero vertical offset puts the content on the bottom rows
    let rotated = extract(&page, &Region { original_width: 3, original_height: 2, ..region.clone() }, 0).unwrap();
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(image.get_pixel(1 + x, 4 + y), rotated.get_pixel(x, y));
        }
    }
    assert!(is_transparent(image.get_pixel(0, 0)));
    assert!(is_transparent(image.get_pixel(4, 3)));
}

#[test]
fn test_padding_adds_transparent_border() {
    let page = create_test_page(16, 16);
    let region = Region::new("pad", 0, 1, 1, 3, 2);

    let image = extract(&page, &region, 2).unwrap();
    assert_eq!(image.dimensions(), (7, 6));
    for (x, y, pixel) in image.enumerate_pixels() {
        let inside = (2..5).contains(&x) && (2..4).contains(&y);
        if inside {
            assert_eq!(pixel, page.get_pixel(1 + x - 2, 1 + y - 2));
        } else {
            assert!(is_transparent(pixel));
        }
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let page = create_test_page(32, 32);
    let mut region = Region::new("again", 0, 4, 4, 6, 3);
    region.rotate = true;
    region.original_width = 8;
    region.original_height = 8;
    region.offset_y = 1;

    let first = extract(&page, &region, 1).unwrap();
    let second = extract(&page, &region, 1).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_zero_area_region() {
    let page = create_test_page(8, 8);
    let region = Region::new("empty", 0, 2, 2, 0, 0);

    let image = extract(&page, &region, 0).unwrap();
    assert_eq!(image.dimensions(), (0, 0));

    let padded = extract(&page, &region, 1).unwrap();
    assert_eq!(padded.dimensions(), (2, 2));
    assert!(padded.pixels().all(is_transparent));
}

#[test]
fn test_region_outside_page_is_rejected() {
    let page = create_test_page(8, 8);
    let region = Region::new("outside", 0, 6, 0, 4, 2);

    let err = extract(&page, &region, 0).unwrap_err();
    assert!(matches!(err, AtlasError::MalformedRegion { .. }));
}

#[test]
fn test_rotated_bounds_use_stored_size() {
    let page = create_test_page(8, 8);
    // Fits as 6x2 but not when stored as 2x6 starting at row 4
    let mut region = Region::new("turned", 0, 0, 4, 6, 2);
    assert!(extract(&page, &region, 0).is_ok());
    region.rotate = true;
    assert!(matches!(extract(&page, &region, 0), Err(AtlasError::MalformedRegion { .. })));
}

#[test]
fn test_larger_than_original_is_rejected() {
    let page = create_test_page(8, 8);
    let mut region = Region::new("grown", 0, 0, 0, 4, 4);
    region.original_width = 3;

    assert!(matches!(extract(&page, &region, 0), Err(AtlasError::MalformedRegion { .. })));
}

#[test]
fn test_invalid_splits_are_rejected() {
    let page = create_test_page(16, 16);
    let region = nine_patch_region(6, 6, [4, 4, 0, 0], None);
    assert!(matches!(extract(&page, &region, 1), Err(AtlasError::MalformedRegion { .. })));

    let region = nine_patch_region(6, 6, [1, 1, -1, 0], None);
    assert!(matches!(extract(&page, &region, 1), Err(AtlasError::MalformedRegion { .. })));

    let region = nine_patch_region(6, 6, [1, 1, 1, 1], Some([0, 0, 4, 4]));
    assert!(matches!(extract(&page, &region, 1), Err(AtlasError::MalformedRegion { .. })));
}

#[test]
fn test_oversized_original_is_rejected() {
    let page = create_test_page(8, 8);
    let mut region = Region::new("hostile", 0, 0, 0, 2, 2);
    region.original_width = 2147483647;
    region.original_height = 2147483647;

    let err = extract(&page, &region, 0).unwrap_err();
    assert!(matches!(err, AtlasError::MalformedRegion { .. }));
}

#[test]
fn test_stripped_nine_patch_keeps_packed_size() {
    let page = create_test_page(16, 16);
    let mut region = nine_patch_region(4, 4, [1, 1, 1, 1], None);
    region.original_width = 10;
    region.original_height = 10;
    region.offset_x = 3;
    region.offset_y = 2;

    let image = extract(&page, &region, 1).unwrap();
    assert_eq!(image.dimensions(), (6, 6));
    assert_eq!(image.get_pixel(1, 1), page.get_pixel(1, 1));
}
