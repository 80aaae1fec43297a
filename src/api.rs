use std::path::Path;
use log::info;

use crate::atlas::errors::AtlasResult;
use crate::atlas::parser;
use crate::atlas::types::Atlas;
use crate::config::UnpackConfig;
use crate::splitter::{AtlasSplitter, DirectoryPageSource, PngDirectorySink, SplitSummary};
use crate::utils::logger::Logger;

/// Main interface to the AtlasKit library
pub struct AtlasKit {
    logger: Logger,
}

impl AtlasKit {
    /// Create a new AtlasKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "atlaskit.log"
    ///
    /// # Returns
    /// An AtlasKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> AtlasResult<Self> {
        let log_path = log_file.unwrap_or(crate::config::DEFAULT_LOG_FILE);
        let logger = Logger::new(log_path)?;
        Ok(AtlasKit { logger })
    }

    /// Parse an atlas metadata file
    ///
    /// # Arguments
    /// * `atlas_path` - Path to the `.atlas` file
    ///
    /// # Returns
    /// The parsed atlas or an error
    pub fn read_atlas<P: AsRef<Path>>(&self, atlas_path: P) -> AtlasResult<Atlas> {
        let atlas = parser::read_atlas_file(atlas_path)?;
        self.logger.print_atlas_layout(&atlas)?;
        Ok(atlas)
    }

    /// Describe the pages and regions of an atlas
    ///
    /// # Arguments
    /// * `atlas_path` - Path to the `.atlas` file
    ///
    /// # Returns
    /// A human readable summary or an error
    pub fn describe<P: AsRef<Path>>(&self, atlas_path: P) -> AtlasResult<String> {
        let atlas = self.read_atlas(atlas_path)?;
        Ok(describe_atlas(&atlas))
    }

    /// Unpack every region of an atlas into image files
    ///
    /// # Arguments
    /// * `config` - Resolved run settings
    ///
    /// # Returns
    /// Counts of the written images or the first error
    pub fn unpack(&self, config: &UnpackConfig) -> AtlasResult<SplitSummary> {
        info!("Unpacking {} into {}", config.atlas_path.display(), config.output_dir.display());
        let atlas = self.read_atlas(&config.atlas_path)?;

        let mut pages = DirectoryPageSource::new(&config.page_dir);
        let mut sink = PngDirectorySink::new(&config.output_dir);
        let splitter = AtlasSplitter::new(&self.logger).with_progress(config.show_progress);
        splitter.split(&atlas, &mut pages, &mut sink)
    }
}

/// Format a human readable summary of an atlas
pub fn describe_atlas(atlas: &Atlas) -> String {
    let mut result = String::from("Atlas Summary:\n");
    result.push_str(&format!("  Pages: {}\n", atlas.pages.len()));
    result.push_str(&format!("  Regions: {}\n", atlas.region_count()));
    result.push_str(&format!("  Nine-patches: {}\n", atlas.nine_patch_count()));

    for (i, page) in atlas.pages.iter().enumerate() {
        result.push_str(&format!("\nPage #{}: {}\n", i, page.file));
        if page.width != 0 && page.height != 0 {
            result.push_str(&format!("  Size: {}x{}\n", page.width, page.height));
        }
        if let Some(format) = &page.format {
            result.push_str(&format!("  Format: {}\n", format));
        }
        let regions: Vec<_> = atlas.regions_for_page(i).collect();
        let rotated = regions.iter().filter(|r| r.rotate).count();
        let stripped = regions.iter().filter(|r| r.is_stripped()).count();
        result.push_str(&format!("  Regions: {} ({} rotated, {} stripped)\n", regions.len(), rotated, stripped));
    }

    result
}
