pub mod atlas;
pub mod extractor;
pub mod splitter;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::AtlasKit;

pub use atlas::{Atlas, AtlasPage, Region, RegionKind, AtlasError, AtlasResult};
pub use extractor::{extract, encode_nine_patch};
pub use splitter::{AtlasSplitter, PageSource, OutputSink, SplitSummary};
