//! Region extraction and nine-patch encoding
//!
//! This module turns regions of a decoded atlas page back into standalone
//! images. Plain regions go through `extract`, stretchable regions through
//! `encode_nine_patch`.

mod region_extractor;
mod nine_patch;
pub mod rotation;

#[cfg(test)]
mod tests;

pub use region_extractor::{extract, validate_region};
pub use nine_patch::{encode as encode_nine_patch, MARKER_COLOR, NINE_PATCH_PADDING};
