//! Texture atlas description
//!
//! This module holds the atlas data model, its error type and the
//! parser for the text metadata format.

pub mod errors;
pub mod types;
pub mod parser;

pub use errors::{AtlasError, AtlasResult};
pub use types::{Atlas, AtlasPage, Region, RegionKind, NO_INDEX};
pub use parser::{parse_atlas, read_atlas_file};
