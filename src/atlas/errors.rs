//! Custom error types for atlas unpacking

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Atlas-specific error types
#[derive(Debug)]
pub enum AtlasError {
    /// I/O error
    IoError(io::Error),
    /// Page image referenced by the metadata does not exist
    MissingPageFile(PathBuf),
    /// Page image exists but could not be decoded as a raster image
    DecodeFailure {
        path: PathBuf,
        message: String,
    },
    /// Region geometry or nine-patch data is inconsistent
    MalformedRegion {
        region: String,
        reason: String,
    },
    /// Nine-patch encoding was requested for a plain region
    NotNinePatch(String),
    /// Rotation other than a quarter turn
    UnsupportedRotation {
        region: String,
        degrees: i32,
    },
    /// Atlas metadata could not be parsed
    Parse {
        line: usize,
        message: String,
    },
    /// Invalid configuration value or file
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::IoError(e) => write!(f, "I/O error: {}", e),
            AtlasError::MissingPageFile(path) => {
                write!(f, "Unable to find atlas image: {}", path.display())
            }
            AtlasError::DecodeFailure { path, message } => {
                write!(f, "Failed to decode atlas image {}: {}", path.display(), message)
            }
            AtlasError::MalformedRegion { region, reason } => {
                write!(f, "Malformed region '{}': {}", region, reason)
            }
            AtlasError::NotNinePatch(name) => write!(f, "Region '{}' has no split data", name),
            AtlasError::UnsupportedRotation { region, degrees } => {
                write!(f, "Unsupported rotation of {} degrees for region '{}'", degrees, region)
            }
            AtlasError::Parse { line, message } => {
                write!(f, "Atlas parse error on line {}: {}", line, message)
            }
            AtlasError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AtlasError::GenericError(msg) => write!(f, "Atlas error: {}", msg),
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AtlasError {
    fn from(error: io::Error) -> Self {
        AtlasError::IoError(error)
    }
}

impl From<image::ImageError> for AtlasError {
    fn from(error: image::ImageError) -> Self {
        AtlasError::GenericError(format!("Image error: {}", error))
    }
}

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

impl From<String> for AtlasError {
    fn from(msg: String) -> Self {
        AtlasError::GenericError(msg)
    }
}

impl AtlasError {
    /// Shorthand for building a `MalformedRegion` error
    pub fn malformed(region: &str, reason: impl Into<String>) -> Self {
        AtlasError::MalformedRegion {
            region: region.to_string(),
            reason: reason.into(),
        }
    }
}
