//! Atlas data model
//!
//! An atlas is a list of pages (packed image files) and a list of regions.
//! Regions reference their page by index into `Atlas::pages`; pages never
//! own their regions.

/// Index value meaning "no index suffix"
pub const NO_INDEX: i32 = -1;

/// One packed image file of an atlas
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtlasPage {
    /// Page image file, relative to the atlas directory
    pub file: String,

    /// Declared width in pixels (0 when the metadata omits it)
    pub width: u32,

    /// Declared height in pixels (0 when the metadata omits it)
    pub height: u32,

    /// Pixel format as written in the metadata, e.g. `RGBA8888`
    pub format: Option<String>,

    /// Minification filter name
    pub min_filter: Option<String>,

    /// Magnification filter name
    pub mag_filter: Option<String>,

    /// Texture wrap setting, e.g. `none`, `x`, `xy`
    pub repeat: Option<String>,
}

impl AtlasPage {
    /// Create a page for the given image file with no declared properties
    pub fn new(file: impl Into<String>) -> Self {
        AtlasPage {
            file: file.into(),
            ..Default::default()
        }
    }
}

/// Whether a region is a plain image or a stretchable nine-patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// Plain sprite
    Plain,
    /// Nine-patch with stretch splits and optional content padding,
    /// both as `[left, right, top, bottom]`
    NinePatch {
        splits: [i32; 4],
        pads: Option<[i32; 4]>,
    },
}

/// A named rectangle packed into one atlas page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    /// Frame index, `NO_INDEX` when the name is unique
    pub index: i32,
    /// Index of the owning page in `Atlas::pages`
    pub page: usize,
    pub left: u32,
    pub top: u32,
    /// Logical width (before rotation, after whitespace stripping)
    pub width: u32,
    /// Logical height (before rotation, after whitespace stripping)
    pub height: u32,
    pub original_width: u32,
    pub original_height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Stored rotated a quarter turn on the page
    pub rotate: bool,
    pub kind: RegionKind,
}

impl Region {
    /// Create an unrotated, unstripped plain region
    pub fn new(name: impl Into<String>, page: usize, left: u32, top: u32, width: u32, height: u32) -> Self {
        Region {
            name: name.into(),
            index: NO_INDEX,
            page,
            left,
            top,
            width,
            height,
            original_width: width,
            original_height: height,
            offset_x: 0,
            offset_y: 0,
            rotate: false,
            kind: RegionKind::Plain,
        }
    }

    /// Size of the rectangle as stored on the page, accounting for rotation
    pub fn packed_size(&self) -> (u32, u32) {
        if self.rotate {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Whether the packer stripped transparent margins from this region
    pub fn is_stripped(&self) -> bool {
        self.width != self.original_width || self.height != self.original_height
    }

    pub fn is_nine_patch(&self) -> bool {
        matches!(self.kind, RegionKind::NinePatch { .. })
    }

    /// Name with the `_<index>` suffix applied when an index is set
    pub fn indexed_name(&self) -> String {
        if self.index == NO_INDEX {
            self.name.clone()
        } else {
            format!("{}_{}", self.name, self.index)
        }
    }
}

/// A parsed atlas description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Atlas {
    pub pages: Vec<AtlasPage>,
    pub regions: Vec<Region>,
}

impl Atlas {
    pub fn new() -> Self {
        Atlas::default()
    }

    /// Regions belonging to the page at `page_index`, in metadata order
    pub fn regions_for_page(&self, page_index: usize) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(move |r| r.page == page_index)
    }

    /// Total number of regions
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Number of nine-patch regions
    pub fn nine_patch_count(&self) -> usize {
        self.regions.iter().filter(|r| r.is_nine_patch()).count()
    }
}
