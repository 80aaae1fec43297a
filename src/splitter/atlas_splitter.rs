//! Atlas splitting
//!
//! Walks the pages of an atlas, loads every page image once and turns each
//! of its regions into a standalone image: plain regions through the region
//! extractor, nine-patches through the nine-patch encoder.

use std::path::PathBuf;

use image::RgbaImage;
use log::{debug, error, info, warn};

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::{Atlas, Region, RegionKind};
use crate::extractor;
use crate::splitter::naming;
use crate::splitter::output_sink::OutputSink;
use crate::splitter::page_source::PageSource;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// One extracted region, ready to be written
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Path relative to the output directory
    pub path: PathBuf,
    pub image: RgbaImage,
}

/// Counts of what a run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitSummary {
    pub pages: usize,
    pub plain_images: usize,
    pub nine_patches: usize,
    /// Zero-area regions that produced nothing to write
    pub skipped: usize,
}

impl SplitSummary {
    /// Number of files handed to the sink
    pub fn written(&self) -> usize {
        self.plain_images + self.nine_patches
    }
}

/// Splits atlases into per-region images
///
/// Holds no state between runs; page images and output destinations are
/// passed to `split` explicitly.
pub struct AtlasSplitter<'a> {
    /// Logger for the run log
    logger: &'a Logger,
    /// Whether to draw a progress bar
    show_progress: bool,
}

impl<'a> AtlasSplitter<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        AtlasSplitter {
            logger,
            show_progress: false,
        }
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Extract every region of `atlas` and hand it to `sink`
    ///
    /// Pages are processed in order and each page image is loaded once.
    /// The first error aborts the run.
    ///
    /// # Arguments
    /// * `atlas` - Parsed atlas metadata
    /// * `pages` - Provider of decoded page images
    /// * `sink` - Destination for the extracted images
    ///
    /// # Returns
    /// Counts of the images written, or the first error encountered
    pub fn split(&self, atlas: &Atlas, pages: &mut dyn PageSource, sink: &mut dyn OutputSink) -> AtlasResult<SplitSummary> {
        info!("Splitting atlas with {} page(s) and {} region(s)", atlas.pages.len(), atlas.regions.len());
        check_page_references(atlas)?;

        let progress = if self.show_progress {
            ProgressTracker::new(atlas.region_count() as u64, "Unpacking regions")
        } else {
            ProgressTracker::hidden()
        };

        let mut summary = SplitSummary::default();
        for (page_index, page) in atlas.pages.iter().enumerate() {
            let page_image = match pages.load_page(page) {
                Ok(image) => image,
                Err(e) => {
                    error!("Failed to load page {}: {}", page.file, e);
                    return Err(e);
                }
            };
            progress.set_message(&page.file);
            summary.pages += 1;

            for region in atlas.regions_for_page(page_index) {
                let output = self.split_region(&page_image, region)?;
                progress.increment(1);

                if output.image.width() == 0 || output.image.height() == 0 {
                    warn!("Region '{}' has no pixels, nothing written", region.indexed_name());
                    summary.skipped += 1;
                    continue;
                }

                sink.write_image(&output.path, &output.image)?;
                match region.kind {
                    RegionKind::Plain => summary.plain_images += 1,
                    RegionKind::NinePatch { .. } => summary.nine_patches += 1,
                }
            }
        }
        progress.finish();

        info!(
            "Wrote {} image(s) and {} nine-patch(es) from {} page(s)",
            summary.plain_images, summary.nine_patches, summary.pages
        );
        self.logger.log(&format!(
            "Split complete: {} plain, {} nine-patch, {} skipped",
            summary.plain_images, summary.nine_patches, summary.skipped
        ))?;
        Ok(summary)
    }

    /// Produce the image and output path for a single region
    pub fn split_region(&self, page_image: &RgbaImage, region: &Region) -> AtlasResult<SplitOutput> {
        let path = naming::output_path(region)?;
        let image = match region.kind {
            RegionKind::Plain => extractor::extract(page_image, region, 0)?,
            RegionKind::NinePatch { .. } => extractor::encode_nine_patch(page_image, region)?,
        };
        debug!("Region '{}' -> {}", region.indexed_name(), path.display());
        Ok(SplitOutput { path, image })
    }
}

/// Every region must point at one of the atlas pages
fn check_page_references(atlas: &Atlas) -> AtlasResult<()> {
    match atlas.regions.iter().find(|r| r.page >= atlas.pages.len()) {
        Some(region) => Err(AtlasError::malformed(
            &region.indexed_name(),
            format!("references page {} but the atlas has {} page(s)", region.page, atlas.pages.len()),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use image::Rgba;

    use crate::atlas::types::AtlasPage;
    use crate::splitter::output_sink::MemorySink;
    use crate::splitter::page_source::MemoryPageSource;

    fn test_logger(name: &str) -> Logger {
        let path = std::env::temp_dir().join(format!("atlaskit_{}_{}.log", name, std::process::id()));
        Logger::new(path.to_str().unwrap()).unwrap()
    }

    fn solid_page(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn two_page_atlas() -> Atlas {
        let mut atlas = Atlas::new();
        atlas.pages.push(AtlasPage::new("a.png"));
        atlas.pages.push(AtlasPage::new("b.png"));

        let mut frame = Region::new("walk", 1, 0, 0, 2, 2);
        frame.index = 0;
        atlas.regions.push(frame);
        atlas.regions.push(Region::new("icon", 0, 0, 0, 3, 3));
        let mut panel = Region::new("panel", 0, 3, 0, 4, 4);
        panel.kind = RegionKind::NinePatch { splits: [1, 1, 1, 1], pads: None };
        atlas.regions.push(panel);
        atlas
    }

    fn memory_pages() -> MemoryPageSource {
        let mut pages = MemoryPageSource::new();
        pages.insert("a.png", solid_page(8, 8, [255, 0, 0, 255]));
        pages.insert("b.png", solid_page(4, 4, [0, 0, 255, 255]));
        pages
    }

    #[test]
    fn test_split_orders_by_page_then_region() {
        let logger = test_logger("splitter_test");
        let splitter = AtlasSplitter::new(&logger);
        let mut sink = MemorySink::new();

        let summary = splitter.split(&two_page_atlas(), &mut memory_pages(), &mut sink).unwrap();
        assert_eq!(summary, SplitSummary { pages: 2, plain_images: 2, nine_patches: 1, skipped: 0 });

        let paths: Vec<&Path> = sink.images.iter().map(|(p, _)| p.as_path()).collect();
        assert_eq!(paths, vec![Path::new("icon.png"), Path::new("panel.9.png"), Path::new("walk_0.png")]);

        let walk = sink.get(Path::new("walk_0.png")).unwrap();
        assert_eq!(*walk.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(sink.get(Path::new("panel.9.png")).unwrap().dimensions(), (6, 6));
    }

    #[test]
    fn test_missing_page_aborts() {
        let logger = test_logger("splitter_test_missing");
        let splitter = AtlasSplitter::new(&logger);
        let mut pages = MemoryPageSource::new();
        pages.insert("a.png", solid_page(8, 8, [255, 0, 0, 255]));
        let mut sink = MemorySink::new();

        let err = splitter.split(&two_page_atlas(), &mut pages, &mut sink).unwrap_err();
        assert!(matches!(err, AtlasError::MissingPageFile(_)));
    }

    #[test]
    fn test_malformed_region_aborts_run() {
        let logger = test_logger("splitter_test_malformed");
        let splitter = AtlasSplitter::new(&logger);
        let mut atlas = two_page_atlas();
        atlas.regions.push(Region::new("huge", 0, 0, 0, 100, 100));
        let mut sink = MemorySink::new();

        let err = splitter.split(&atlas, &mut memory_pages(), &mut sink).unwrap_err();
        assert!(matches!(err, AtlasError::MalformedRegion { .. }));
    }

    #[test]
    fn test_dangling_page_reference() {
        let logger = test_logger("splitter_test_dangling");
        let splitter = AtlasSplitter::new(&logger);
        let mut atlas = two_page_atlas();
        atlas.regions.push(Region::new("lost", 7, 0, 0, 1, 1));
        let mut sink = MemorySink::new();

        let err = splitter.split(&atlas, &mut memory_pages(), &mut sink).unwrap_err();
        assert!(matches!(err, AtlasError::MalformedRegion { .. }));
        assert!(sink.images.is_empty());
    }

    #[test]
    fn test_zero_area_region_is_skipped() {
        let logger = test_logger("splitter_test_empty");
        let splitter = AtlasSplitter::new(&logger);
        let mut atlas = two_page_atlas();
        atlas.regions.push(Region::new("nothing", 0, 0, 0, 0, 0));
        let mut sink = MemorySink::new();

        let summary = splitter.split(&atlas, &mut memory_pages(), &mut sink).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.written(), 3);
    }
}
