//! Texture atlas metadata parser
//!
//! Reads the libGDX text atlas format. A page starts with its image file name
//! (at the start of the file or after a blank line) followed by `key: value`
//! page fields. Every further line without a colon starts a region of that
//! page, and the `key: value` lines after it describe the region.
//!
//! Both the classic field layout (`xy`, `size`, `orig`, `offset`) and the
//! newer combined one (`bounds`, `offsets`) are understood.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::{Atlas, AtlasPage, Region, RegionKind, NO_INDEX};

lazy_static! {
    // `key: value` with arbitrary leading indentation
    static ref FIELD_LINE: Regex = Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.*?)\s*$")
        .expect("field pattern is valid");
}

/// Parse atlas metadata from a file on disk
pub fn read_atlas_file<P: AsRef<Path>>(path: P) -> AtlasResult<Atlas> {
    let path = path.as_ref();
    info!("Reading atlas metadata from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_atlas(&content)
}

/// Parse atlas metadata from its text form
pub fn parse_atlas(content: &str) -> AtlasResult<Atlas> {
    let mut parser = AtlasParser::new();
    for (number, line) in content.lines().enumerate() {
        parser.feed_line(number + 1, line)?;
    }
    let atlas = parser.finish()?;
    info!("Parsed atlas with {} page(s) and {} region(s)", atlas.pages.len(), atlas.regions.len());
    Ok(atlas)
}

/// Fields collected for a region until its block ends
struct PendingRegion {
    name: String,
    line: usize,
    page: usize,
    rotate: bool,
    xy: Option<[i32; 2]>,
    size: Option<[i32; 2]>,
    orig: Option<[i32; 2]>,
    offset: [i32; 2],
    index: i32,
    split: Option<[i32; 4]>,
    pad: Option<[i32; 4]>,
}

impl PendingRegion {
    fn new(name: &str, line: usize, page: usize) -> Self {
        PendingRegion {
            name: name.to_string(),
            line,
            page,
            rotate: false,
            xy: None,
            size: None,
            orig: None,
            offset: [0, 0],
            index: NO_INDEX,
            split: None,
            pad: None,
        }
    }

    fn apply(&mut self, line: usize, key: &str, value: &str) -> AtlasResult<()> {
        match key {
            "rotate" => self.rotate = parse_rotate(&self.name, line, value)?,
            "xy" => self.xy = Some(parse_tuple(line, value)?),
            "size" => self.size = Some(parse_tuple(line, value)?),
            "orig" => self.orig = Some(parse_tuple(line, value)?),
            "offset" => self.offset = parse_tuple(line, value)?,
            "bounds" => {
                let [x, y, w, h] = parse_tuple(line, value)?;
                self.xy = Some([x, y]);
                self.size = Some([w, h]);
            }
            "offsets" => {
                let [x, y, w, h] = parse_tuple(line, value)?;
                self.offset = [x, y];
                self.orig = Some([w, h]);
            }
            "index" => {
                let [index] = parse_tuple(line, value)?;
                self.index = index;
            }
            "split" => self.split = Some(parse_tuple(line, value)?),
            "pad" => self.pad = Some(parse_tuple(line, value)?),
            _ => debug!("Ignoring unknown region field '{}' on line {}", key, line),
        }
        Ok(())
    }

    fn build(self) -> AtlasResult<Region> {
        let [left, top] = self.xy.ok_or_else(|| missing_field(&self.name, self.line, "xy"))?;
        let [width, height] = self.size.ok_or_else(|| missing_field(&self.name, self.line, "size"))?;
        let [original_width, original_height] = self.orig.unwrap_or([width, height]);

        let kind = match self.split {
            Some(splits) => RegionKind::NinePatch { splits, pads: self.pad },
            None => {
                if self.pad.is_some() {
                    debug!("Region '{}' declares pads without splits, ignoring them", self.name);
                }
                RegionKind::Plain
            }
        };

        Ok(Region {
            left: to_unsigned(self.line, "xy", left)?,
            top: to_unsigned(self.line, "xy", top)?,
            width: to_unsigned(self.line, "size", width)?,
            height: to_unsigned(self.line, "size", height)?,
            original_width: to_unsigned(self.line, "orig", original_width)?,
            original_height: to_unsigned(self.line, "orig", original_height)?,
            offset_x: self.offset[0],
            offset_y: self.offset[1],
            rotate: self.rotate,
            index: self.index,
            page: self.page,
            name: self.name,
            kind,
        })
    }
}

/// Line-driven parser state
struct AtlasParser {
    atlas: Atlas,
    current_page: Option<usize>,
    pending: Option<PendingRegion>,
}

impl AtlasParser {
    fn new() -> Self {
        AtlasParser {
            atlas: Atlas::new(),
            current_page: None,
            pending: None,
        }
    }

    fn feed_line(&mut self, number: usize, line: &str) -> AtlasResult<()> {
        if line.trim().is_empty() {
            self.flush_region()?;
            self.current_page = None;
            return Ok(());
        }

        if let Some(caps) = FIELD_LINE.captures(line) {
            let key = &caps[1];
            let value = &caps[2];
            if let Some(pending) = self.pending.as_mut() {
                return pending.apply(number, key, value);
            }
            return match self.current_page {
                Some(page) => self.apply_page_field(page, number, key, value),
                None => Err(AtlasError::Parse {
                    line: number,
                    message: format!("field '{}' appears before any page", key),
                }),
            };
        }

        let name = line.trim();
        match self.current_page {
            None => {
                debug!("Page '{}' starts on line {}", name, number);
                self.atlas.pages.push(AtlasPage::new(name));
                self.current_page = Some(self.atlas.pages.len() - 1);
            }
            Some(page) => {
                self.flush_region()?;
                self.pending = Some(PendingRegion::new(name, number, page));
            }
        }
        Ok(())
    }

    fn apply_page_field(&mut self, page: usize, line: usize, key: &str, value: &str) -> AtlasResult<()> {
        let page = &mut self.atlas.pages[page];
        match key {
            "size" => {
                let [width, height] = parse_tuple(line, value)?;
                page.width = to_unsigned(line, "size", width)?;
                page.height = to_unsigned(line, "size", height)?;
            }
            "format" => page.format = Some(value.to_string()),
            "filter" => {
                let mut parts = value.split(',').map(str::trim);
                page.min_filter = parts.next().map(str::to_string);
                page.mag_filter = parts.next().map(str::to_string);
            }
            "repeat" => page.repeat = Some(value.to_string()),
            _ => debug!("Ignoring unknown page field '{}' on line {}", key, line),
        }
        Ok(())
    }

    fn flush_region(&mut self) -> AtlasResult<()> {
        if let Some(pending) = self.pending.take() {
            let region = pending.build()?;
            self.atlas.regions.push(region);
        }
        Ok(())
    }

    fn finish(mut self) -> AtlasResult<Atlas> {
        self.flush_region()?;
        Ok(self.atlas)
    }
}

/// Parse a comma separated list of exactly `N` integers
fn parse_tuple<const N: usize>(line: usize, value: &str) -> AtlasResult<[i32; N]> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(AtlasError::Parse {
            line,
            message: format!("expected {} value(s), found {} in '{}'", N, parts.len(), value),
        });
    }

    let mut out = [0i32; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse::<i32>().map_err(|_| AtlasError::Parse {
            line,
            message: format!("invalid number '{}'", part),
        })?;
    }
    Ok(out)
}

fn parse_rotate(region: &str, line: usize, value: &str) -> AtlasResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => {
            let degrees = value.parse::<i32>().map_err(|_| AtlasError::Parse {
                line,
                message: format!("invalid rotate value '{}'", value),
            })?;
            match degrees {
                0 => Ok(false),
                90 => Ok(true),
                _ => Err(AtlasError::UnsupportedRotation {
                    region: region.to_string(),
                    degrees,
                }),
            }
        }
    }
}

fn to_unsigned(line: usize, field: &str, value: i32) -> AtlasResult<u32> {
    u32::try_from(value).map_err(|_| AtlasError::Parse {
        line,
        message: format!("'{}' must not be negative, found {}", field, value),
    })
}

fn missing_field(region: &str, line: usize, field: &str) -> AtlasError {
    AtlasError::Parse {
        line,
        message: format!("region '{}' is missing '{}'", region, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
sprites.png
size: 64, 32
format: RGBA8888
filter: Nearest, Linear
repeat: none
button
  rotate: false
  xy: 2, 2
  size: 10, 8
  split: 2, 3, 1, 1
  pad: 1, 1, 2, 2
  orig: 10, 8
  offset: 0, 0
  index: -1
walk
  rotate: true
  xy: 14, 2
  size: 4, 6
  orig: 8, 8
  offset: 1, 2
  index: 3

extra.png
size: 16, 16
format: RGBA8888
filter: Nearest, Nearest
repeat: none
ui/dot
  bounds: 0, 0, 2, 2
  offsets: 0, 0, 2, 2
";

    #[test]
    fn test_parse_pages_and_regions() {
        let atlas = parse_atlas(SAMPLE).unwrap();
        assert_eq!(atlas.pages.len(), 2);
        assert_eq!(atlas.regions.len(), 3);

        let page = &atlas.pages[0];
        assert_eq!(page.file, "sprites.png");
        assert_eq!((page.width, page.height), (64, 32));
        assert_eq!(page.min_filter.as_deref(), Some("Nearest"));
        assert_eq!(page.mag_filter.as_deref(), Some("Linear"));
        assert_eq!(page.repeat.as_deref(), Some("none"));
    }

    #[test]
    fn test_parse_nine_patch_region() {
        let atlas = parse_atlas(SAMPLE).unwrap();
        let button = &atlas.regions[0];
        assert_eq!(button.name, "button");
        assert_eq!(button.page, 0);
        assert_eq!((button.left, button.top, button.width, button.height), (2, 2, 10, 8));
        assert_eq!(
            button.kind,
            RegionKind::NinePatch {
                splits: [2, 3, 1, 1],
                pads: Some([1, 1, 2, 2]),
            }
        );
    }

    #[test]
    fn test_parse_rotated_stripped_region() {
        let atlas = parse_atlas(SAMPLE).unwrap();
        let walk = &atlas.regions[1];
        assert!(walk.rotate);
        assert_eq!(walk.index, 3);
        assert_eq!((walk.original_width, walk.original_height), (8, 8));
        assert_eq!((walk.offset_x, walk.offset_y), (1, 2));
        assert_eq!(walk.kind, RegionKind::Plain);
    }

    #[test]
    fn test_parse_combined_fields() {
        let atlas = parse_atlas(SAMPLE).unwrap();
        let dot = &atlas.regions[2];
        assert_eq!(dot.name, "ui/dot");
        assert_eq!(dot.page, 1);
        assert_eq!(dot.index, NO_INDEX);
        assert_eq!((dot.width, dot.height, dot.original_width, dot.original_height), (2, 2, 2, 2));
    }

    #[test]
    fn test_orig_defaults_to_size() {
        let atlas = parse_atlas("p.png\nr\n  xy: 0, 0\n  size: 3, 5\n").unwrap();
        let region = &atlas.regions[0];
        assert_eq!((region.original_width, region.original_height), (3, 5));
        assert!(!region.is_stripped());
    }

    #[test]
    fn test_rotate_degrees() {
        let atlas = parse_atlas("p.png\nr\n  rotate: 90\n  xy: 0, 0\n  size: 3, 5\n").unwrap();
        assert!(atlas.regions[0].rotate);

        let err = parse_atlas("p.png\nr\n  rotate: 180\n  xy: 0, 0\n  size: 3, 5\n").unwrap_err();
        assert!(matches!(err, AtlasError::UnsupportedRotation { degrees: 180, .. }));
    }

    #[test]
    fn test_missing_xy_is_an_error() {
        let err = parse_atlas("p.png\nr\n  size: 3, 5\n").unwrap_err();
        assert!(matches!(err, AtlasError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_tuple_arity() {
        let err = parse_atlas("p.png\nr\n  xy: 0\n  size: 3, 5\n").unwrap_err();
        assert!(matches!(err, AtlasError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_field_before_page() {
        let err = parse_atlas("size: 3, 5\n").unwrap_err();
        assert!(matches!(err, AtlasError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_pads_without_splits_are_dropped() {
        let atlas = parse_atlas("p.png\nr\n  xy: 0, 0\n  size: 3, 5\n  pad: 1, 1, 1, 1\n").unwrap();
        assert_eq!(atlas.regions[0].kind, RegionKind::Plain);
    }
}
