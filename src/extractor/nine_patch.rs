//! Nine-patch encoding
//!
//! Writes split and padding information into a one pixel border around the
//! extracted region, the way `.9.png` assets carry it: black runs on the top
//! and left edges mark the stretchable area, black runs on the bottom and
//! right edges mark the content padding.

use image::{Rgba, RgbaImage};
use log::debug;

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::{Region, RegionKind};
use crate::extractor::region_extractor;

/// Border width reserved for the marker lines
pub const NINE_PATCH_PADDING: u32 = 1;

/// Colour of every marker pixel
pub const MARKER_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Extract a nine-patch region and stamp its border markers
///
/// # Arguments
/// * `page` - Decoded page image the region is packed into
/// * `region` - A region of kind `RegionKind::NinePatch`
///
/// # Returns
/// The region with a one pixel marker border, `NotNinePatch` for plain
/// regions, or any extraction error
pub fn encode(page: &RgbaImage, region: &Region) -> AtlasResult<RgbaImage> {
    let RegionKind::NinePatch { splits, pads } = region.kind else {
        return Err(AtlasError::NotNinePatch(region.indexed_name()));
    };

    let mut image = region_extractor::extract(page, region, NINE_PATCH_PADDING)?;

    let (start_x, end_x) = marker_span(splits[0], splits[1], region.width);
    let (start_y, end_y) = marker_span(splits[2], splits[3], region.height);
    draw_row(&mut image, 0, start_x, end_x);
    draw_column(&mut image, 0, start_y, end_y);
    debug!(
        "Nine-patch '{}' stretch span x=[{}, {}] y=[{}, {}]",
        region.indexed_name(),
        start_x,
        end_x,
        start_y,
        end_y
    );

    if let Some(pads) = pads {
        let last_row = image.height().saturating_sub(1) as i64;
        let last_column = image.width().saturating_sub(1) as i64;
        let (pad_start_x, pad_end_x) = marker_span(pads[0], pads[1], region.width);
        let (pad_start_y, pad_end_y) = marker_span(pads[2], pads[3], region.height);
        draw_row(&mut image, last_row, pad_start_x, pad_end_x);
        draw_column(&mut image, last_column, pad_start_y, pad_end_y);
    }

    Ok(image)
}

/// Inclusive marker range in padded coordinates for a `[near, far]` pair
fn marker_span(near: i32, far: i32, size: u32) -> (i64, i64) {
    let start = near as i64 + NINE_PATCH_PADDING as i64;
    let end = size as i64 - far as i64 + NINE_PATCH_PADDING as i64 - 1;
    (start, end)
}

/// Draw `[start, end]` on row `y`; an empty range draws nothing
fn draw_row(image: &mut RgbaImage, y: i64, start: i64, end: i64) {
    if end < start || y < 0 || y >= image.height() as i64 {
        return;
    }
    let last = end.min(image.width() as i64 - 1);
    for x in start.max(0)..=last {
        image.put_pixel(x as u32, y as u32, MARKER_COLOR);
    }
}

/// Draw `[start, end]` on column `x`; an empty range draws nothing
fn draw_column(image: &mut RgbaImage, x: i64, start: i64, end: i64) {
    if end < start || x < 0 || x >= image.width() as i64 {
        return;
    }
    let last = end.min(image.height() as i64 - 1);
    for y in start.max(0)..=last {
        image.put_pixel(x as u32, y as u32, MARKER_COLOR);
    }
}
