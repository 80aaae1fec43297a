//! Atlas unpacking command
//!
//! This module implements the command that splits an atlas into
//! standalone sprite and nine-patch images.

use log::{error, info};

use crate::atlas::errors::AtlasResult;
use crate::atlas::parser;
use crate::commands::command_traits::Command;
use crate::config::UnpackConfig;
use crate::splitter::{AtlasSplitter, DirectoryPageSource, PngDirectorySink};
use crate::utils::logger::Logger;

/// Command for unpacking an atlas into image files
pub struct UnpackCommand<'a> {
    /// Resolved run settings
    config: UnpackConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> UnpackCommand<'a> {
    /// Create a new unpack command
    ///
    /// # Arguments
    /// * `config` - Resolved run settings
    /// * `logger` - Logger for recording operations
    pub fn new(config: UnpackConfig, logger: &'a Logger) -> Self {
        info!("Creating unpack command for {}", config.atlas_path.display());
        UnpackCommand { config, logger }
    }
}

impl<'a> Command for UnpackCommand<'a> {
    fn execute(&self) -> AtlasResult<()> {
        info!("Input atlas: {}", self.config.atlas_path.display());
        info!("Page directory: {}", self.config.page_dir.display());
        info!("Output directory: {}", self.config.output_dir.display());

        let atlas = parser::read_atlas_file(&self.config.atlas_path)?;
        self.logger.print_atlas_layout(&atlas)?;

        let mut pages = DirectoryPageSource::new(&self.config.page_dir);
        let mut sink = PngDirectorySink::new(&self.config.output_dir);
        let splitter = AtlasSplitter::new(self.logger).with_progress(self.config.show_progress);

        match splitter.split(&atlas, &mut pages, &mut sink) {
            Ok(summary) => {
                println!(
                    "Unpacked {} image(s) and {} nine-patch(es) into {}",
                    summary.plain_images,
                    summary.nine_patches,
                    self.config.output_dir.display()
                );
                Ok(())
            }
            Err(e) => {
                error!("Unpacking failed: {}", e);
                Err(e)
            }
        }
    }
}
