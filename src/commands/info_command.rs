//! Atlas information command
//!
//! Prints the pages and region statistics of an atlas without
//! extracting anything.

use log::info;

use crate::api::describe_atlas;
use crate::atlas::errors::AtlasResult;
use crate::atlas::parser;
use crate::commands::command_traits::Command;
use crate::config::UnpackConfig;
use crate::utils::logger::Logger;

/// Command for describing an atlas
pub struct InfoCommand<'a> {
    /// Resolved run settings
    config: UnpackConfig,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    pub fn new(config: UnpackConfig, logger: &'a Logger) -> Self {
        InfoCommand { config, logger }
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> AtlasResult<()> {
        info!("Describing atlas {}", self.config.atlas_path.display());

        let atlas = parser::read_atlas_file(&self.config.atlas_path)?;
        self.logger.print_atlas_layout(&atlas)?;

        println!("{}", describe_atlas(&atlas));
        Ok(())
    }
}
