//! Page image providers
//!
//! The splitter asks a `PageSource` for each page exactly once. The
//! directory source decodes image files with the `image` crate; the memory
//! source serves buffers that are already decoded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{info, warn};

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::AtlasPage;

/// Provides decoded page images
pub trait PageSource {
    /// Load the image for `page` as RGBA8
    ///
    /// # Returns
    /// The decoded page, `MissingPageFile` when it cannot be found or
    /// `DecodeFailure` when it is not a readable image
    fn load_page(&mut self, page: &AtlasPage) -> AtlasResult<RgbaImage>;
}

/// Reads page images relative to a directory
pub struct DirectoryPageSource {
    /// Directory page file names are resolved against
    dir: PathBuf,
}

impl DirectoryPageSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        DirectoryPageSource {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Full path of a page's image file
    pub fn page_path(&self, page: &AtlasPage) -> PathBuf {
        self.dir.join(&page.file)
    }
}

impl PageSource for DirectoryPageSource {
    fn load_page(&mut self, page: &AtlasPage) -> AtlasResult<RgbaImage> {
        let path = self.page_path(page);
        if !path.is_file() {
            return Err(AtlasError::MissingPageFile(path));
        }

        info!("Decoding atlas page {}", path.display());
        let image = image::open(&path).map_err(|e| AtlasError::DecodeFailure {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let image = image.to_rgba8();

        if page.width != 0 && page.height != 0 && image.dimensions() != (page.width, page.height) {
            warn!(
                "Page {} is {}x{} but the atlas declares {}x{}",
                page.file,
                image.width(),
                image.height(),
                page.width,
                page.height
            );
        }
        Ok(image)
    }
}

/// Serves pages from already decoded buffers, keyed by page file name
#[derive(Default)]
pub struct MemoryPageSource {
    pages: HashMap<String, RgbaImage>,
}

impl MemoryPageSource {
    pub fn new() -> Self {
        MemoryPageSource::default()
    }

    /// Register the buffer for a page file name
    pub fn insert(&mut self, file: impl Into<String>, image: RgbaImage) {
        self.pages.insert(file.into(), image);
    }
}

impl PageSource for MemoryPageSource {
    fn load_page(&mut self, page: &AtlasPage) -> AtlasResult<RgbaImage> {
        self.pages
            .get(&page.file)
            .cloned()
            .ok_or_else(|| AtlasError::MissingPageFile(PathBuf::from(&page.file)))
    }
}
