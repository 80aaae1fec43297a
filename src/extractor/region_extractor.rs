//! Region extraction
//!
//! Cuts a single region out of a decoded atlas page and undoes what the
//! packer did to it: quarter-turn rotation and whitespace stripping. An
//! optional transparent border can be added around the result, which the
//! nine-patch encoder uses for its marker lines.

use image::{imageops, RgbaImage};
use log::debug;

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::{Region, RegionKind};
use crate::extractor::rotation;

/// Largest accepted canvas side, in pixels
pub const MAX_CANVAS_SIDE: u32 = 1 << 15;

/// Extract `region` from `page`, surrounded by `padding` transparent pixels
///
/// # Arguments
/// * `page` - Decoded page image the region is packed into
/// * `region` - Region to extract
/// * `padding` - Width of the transparent border to add on every side
///
/// # Returns
/// The region at its original size plus the border, or `MalformedRegion`
/// when the region does not fit its page or carries invalid nine-patch data.
/// Nine-patches keep their packed size: their split and pad offsets are
/// relative to the packed rectangle, so whitespace is not restored for them.
pub fn extract(page: &RgbaImage, region: &Region, padding: u32) -> AtlasResult<RgbaImage> {
    validate_region(page, region)?;

    let (packed_width, packed_height) = region.packed_size();
    let stored = imageops::crop_imm(page, region.left, region.top, packed_width, packed_height).to_image();

    let mut image = if region.rotate {
        rotation::rotate_quarter_clockwise(&stored)
    } else {
        stored
    };
    debug!(
        "Extracted '{}' at ({}, {}) as {}x{} (rotated: {})",
        region.indexed_name(),
        region.left,
        region.top,
        image.width(),
        image.height(),
        region.rotate
    );

    if region.is_stripped() && !region.is_nine_patch() {
        image = restore_whitespace(&image, region);
    }

    if padding > 0 {
        image = add_border(&image, padding);
    }

    Ok(image)
}

/// Place the packed pixels back onto a transparent canvas of the original size.
///
/// Offsets are measured from the bottom-left corner, so the vertical
/// position is flipped into the top-down buffer.
fn restore_whitespace(image: &RgbaImage, region: &Region) -> RgbaImage {
    let mut canvas = RgbaImage::new(region.original_width, region.original_height);
    let x = region.offset_x as i64;
    let y = region.original_height as i64 - region.height as i64 - region.offset_y as i64;
    debug!(
        "Restoring whitespace for '{}': {}x{} canvas, content at ({}, {})",
        region.indexed_name(),
        region.original_width,
        region.original_height,
        x,
        y
    );
    imageops::replace(&mut canvas, image, x, y);
    canvas
}

/// Copy `image` into the middle of a buffer `2 * padding` larger in both dimensions
fn add_border(image: &RgbaImage, padding: u32) -> RgbaImage {
    let mut padded = RgbaImage::new(image.width() + padding * 2, image.height() + padding * 2);
    imageops::replace(&mut padded, image, padding as i64, padding as i64);
    padded
}

/// Check a region against its page and the nine-patch invariants
pub fn validate_region(page: &RgbaImage, region: &Region) -> AtlasResult<()> {
    let name = region.indexed_name();
    let (packed_width, packed_height) = region.packed_size();

    let right = region.left as u64 + packed_width as u64;
    let bottom = region.top as u64 + packed_height as u64;
    if right > page.width() as u64 || bottom > page.height() as u64 {
        return Err(AtlasError::malformed(
            &name,
            format!(
                "rectangle ({}, {}, {}x{}) exceeds page bounds {}x{}",
                region.left,
                region.top,
                packed_width,
                packed_height,
                page.width(),
                page.height()
            ),
        ));
    }

    if region.width > region.original_width || region.height > region.original_height {
        return Err(AtlasError::malformed(
            &name,
            format!(
                "packed size {}x{} is larger than original size {}x{}",
                region.width, region.height, region.original_width, region.original_height
            ),
        ));
    }

    if region.original_width > MAX_CANVAS_SIDE || region.original_height > MAX_CANVAS_SIDE {
        return Err(AtlasError::malformed(
            &name,
            format!(
                "original size {}x{} exceeds the {} pixel limit",
                region.original_width, region.original_height, MAX_CANVAS_SIDE
            ),
        ));
    }

    if let RegionKind::NinePatch { splits, pads } = region.kind {
        validate_edges(&name, "splits", &splits, region)?;
        if let Some(pads) = pads {
            validate_edges(&name, "pads", &pads, region)?;
        }
    }

    Ok(())
}

/// `[left, right, top, bottom]` must be non-negative and fit the region.
///
/// A pair may overshoot the size by one pixel, which leaves an empty span
/// and so no marker line on that axis.
fn validate_edges(name: &str, label: &str, edges: &[i32; 4], region: &Region) -> AtlasResult<()> {
    if edges.iter().any(|&v| v < 0) {
        return Err(AtlasError::malformed(name, format!("{} {:?} contain negative values", label, edges)));
    }
    if edges[0] as i64 + edges[1] as i64 > region.width as i64 + 1 {
        return Err(AtlasError::malformed(
            name,
            format!("horizontal {} {}+{} exceed width {}", label, edges[0], edges[1], region.width),
        ));
    }
    if edges[2] as i64 + edges[3] as i64 > region.height as i64 + 1 {
        return Err(AtlasError::malformed(
            name,
            format!("vertical {} {}+{} exceed height {}", label, edges[2], edges[3], region.height),
        ));
    }
    Ok(())
}
