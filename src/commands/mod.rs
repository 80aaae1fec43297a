//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod unpack_command;
pub mod info_command;

pub use command_traits::{Command, CommandFactory};
pub use unpack_command::UnpackCommand;
pub use info_command::InfoCommand;

use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::config::{ConfigOverrides, UnpackConfig};
use crate::utils::logger::Logger;

/// Build the run configuration from CLI arguments
///
/// A `--config` file is read first; options given on the command line
/// override its values.
pub fn resolve_config(args: &ArgMatches) -> AtlasResult<UnpackConfig> {
    let input = args
        .get_one::<String>("input")
        .ok_or_else(|| AtlasError::ConfigError("Missing input atlas file".to_string()))?;

    let file_overrides = match args.get_one::<String>("config") {
        Some(path) => ConfigOverrides::from_file(path)?,
        None => ConfigOverrides::default(),
    };

    let cli_overrides = ConfigOverrides {
        output_dir: args.get_one::<String>("output").map(PathBuf::from),
        page_dir: args.get_one::<String>("pages").map(PathBuf::from),
        log_file: args.get_one::<String>("log-file").cloned(),
        show_progress: if args.get_flag("no-progress") { Some(false) } else { None },
    };

    Ok(UnpackConfig::resolve(input, file_overrides.merged_with(cli_overrides)))
}

/// Factory for creating command instances based on CLI arguments
pub struct AtlaskitCommandFactory;

impl AtlaskitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        AtlaskitCommandFactory
    }
}

impl Default for AtlaskitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for AtlaskitCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: UnpackConfig, logger: &'a Logger) -> AtlasResult<Box<dyn Command + 'a>> {
        if args.get_flag("info") {
            info!("Creating info command");
            Ok(Box::new(InfoCommand::new(config, logger)))
        } else {
            Ok(Box::new(UnpackCommand::new(config, logger)))
        }
    }
}
