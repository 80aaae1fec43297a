//! Run configuration
//!
//! Settings come from the command line and may be layered on top of a TOML
//! file with an `[unpack]` table:
//!
//! ```toml
//! [unpack]
//! output_dir = "sprites"
//! page_dir = "atlas"
//! log_file = "unpack.log"
//! show_progress = false
//! ```
//!
//! Values given on the command line take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::atlas::errors::{AtlasError, AtlasResult};

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "atlaskit.log";

/// Suffix of the default output directory, appended to the atlas file stem
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_unpacked";

/// Settings that may appear in a configuration file; unset fields are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub page_dir: Option<PathBuf>,
    pub log_file: Option<String>,
    pub show_progress: Option<bool>,
}

impl ConfigOverrides {
    /// Parse overrides from TOML text
    pub fn from_str(content: &str) -> AtlasResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(AtlasError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let mut overrides = ConfigOverrides::default();
        let Some(table) = toml_value.get("unpack") else {
            debug!("Configuration has no [unpack] table");
            return Ok(overrides);
        };
        let table = table
            .as_table()
            .ok_or_else(|| AtlasError::ConfigError("'unpack' must be a table".to_string()))?;

        for (key, value) in table {
            match key.as_str() {
                "output_dir" => overrides.output_dir = Some(PathBuf::from(expect_str(key, value)?)),
                "page_dir" => overrides.page_dir = Some(PathBuf::from(expect_str(key, value)?)),
                "log_file" => overrides.log_file = Some(expect_str(key, value)?.to_string()),
                "show_progress" => {
                    overrides.show_progress = Some(value.as_bool().ok_or_else(|| {
                        AtlasError::ConfigError(format!("'{}' must be a boolean", key))
                    })?)
                }
                _ => debug!("Ignoring unknown configuration key '{}'", key),
            }
        }

        Ok(overrides)
    }

    /// Load overrides from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AtlasResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| AtlasError::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// Combine with `other`, preferring values set in `other`
    pub fn merged_with(self, other: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            output_dir: other.output_dir.or(self.output_dir),
            page_dir: other.page_dir.or(self.page_dir),
            log_file: other.log_file.or(self.log_file),
            show_progress: other.show_progress.or(self.show_progress),
        }
    }
}

fn expect_str<'v>(key: &str, value: &'v toml::Value) -> AtlasResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| AtlasError::ConfigError(format!("'{}' must be a string", key)))
}

/// Fully resolved settings for one unpack run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpackConfig {
    /// Atlas metadata file
    pub atlas_path: PathBuf,
    /// Directory the extracted images are written to
    pub output_dir: PathBuf,
    /// Directory page image files are resolved against
    pub page_dir: PathBuf,
    pub log_file: String,
    pub show_progress: bool,
}

impl UnpackConfig {
    /// Resolve settings for `atlas_path`, filling defaults for anything unset
    pub fn resolve<P: AsRef<Path>>(atlas_path: P, overrides: ConfigOverrides) -> Self {
        let atlas_path = atlas_path.as_ref().to_path_buf();
        let atlas_dir = atlas_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let output_dir = overrides.output_dir.unwrap_or_else(|| {
            let stem = atlas_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "atlas".to_string());
            atlas_dir.join(format!("{}{}", stem, DEFAULT_OUTPUT_SUFFIX))
        });

        UnpackConfig {
            page_dir: overrides.page_dir.unwrap_or(atlas_dir),
            output_dir,
            log_file: overrides.log_file.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            show_progress: overrides.show_progress.unwrap_or(true),
            atlas_path,
        }
    }
}
