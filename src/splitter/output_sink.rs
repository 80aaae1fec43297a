//! Destinations for extracted images

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use log::debug;

use crate::atlas::errors::AtlasResult;

/// Receives every extracted image together with its relative output path
pub trait OutputSink {
    fn write_image(&mut self, path: &Path, image: &RgbaImage) -> AtlasResult<()>;
}

/// Writes PNG files below an output directory, creating directories as needed
pub struct PngDirectorySink {
    output_dir: PathBuf,
}

impl PngDirectorySink {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        PngDirectorySink {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl OutputSink for PngDirectorySink {
    fn write_image(&mut self, path: &Path, image: &RgbaImage) -> AtlasResult<()> {
        let target = self.output_dir.join(path);
        if let Some(parent) = target.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!("Writing {}x{} image to {}", image.width(), image.height(), target.display());
        image.save_with_format(&target, ImageFormat::Png)?;
        Ok(())
    }
}

/// Collects images in memory, in the order they were produced
#[derive(Default)]
pub struct MemorySink {
    pub images: Vec<(PathBuf, RgbaImage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Image written under `path`, if any
    pub fn get(&self, path: &Path) -> Option<&RgbaImage> {
        self.images.iter().find(|(p, _)| p == path).map(|(_, image)| image)
    }
}

impl OutputSink for MemorySink {
    fn write_image(&mut self, path: &Path, image: &RgbaImage) -> AtlasResult<()> {
        self.images.push((path.to_path_buf(), image.clone()));
        Ok(())
    }
}
