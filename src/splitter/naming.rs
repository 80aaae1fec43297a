//! Output file naming
//!
//! Plain regions become `<name>[_<index>].png`, nine-patches
//! `<name>[_<index>].9.png`. Slashes in region names map to subdirectories.

use std::path::{Component, PathBuf};

use crate::atlas::errors::{AtlasError, AtlasResult};
use crate::atlas::types::{Region, RegionKind};

/// Extension written for plain regions
pub const OUTPUT_TYPE: &str = "png";

/// Extension for a region, without the leading dot
pub fn output_extension(region: &Region) -> String {
    match region.kind {
        RegionKind::Plain => OUTPUT_TYPE.to_string(),
        RegionKind::NinePatch { .. } => format!("9.{}", OUTPUT_TYPE),
    }
}

/// Relative output path for a region
///
/// Names that are empty, absolute or climb out of the output directory are
/// rejected as malformed.
pub fn output_path(region: &Region) -> AtlasResult<PathBuf> {
    if region.name.trim().is_empty() {
        return Err(AtlasError::malformed(&region.name, "region name is empty"));
    }

    let path = PathBuf::from(format!("{}.{}", region.indexed_name(), output_extension(region)));
    if !path.components().all(|c| matches!(c, Component::Normal(_))) {
        return Err(AtlasError::malformed(
            &region.name,
            format!("output path {} leaves the output directory", path.display()),
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(index: i32, kind: RegionKind) -> Region {
        let mut region = Region::new("icon", 0, 0, 0, 4, 4);
        region.index = index;
        region.kind = kind;
        region
    }

    #[test]
    fn test_plain_names() {
        assert_eq!(output_path(&icon(2, RegionKind::Plain)).unwrap(), PathBuf::from("icon_2.png"));
        assert_eq!(output_path(&icon(-1, RegionKind::Plain)).unwrap(), PathBuf::from("icon.png"));
    }

    #[test]
    fn test_nine_patch_names() {
        let kind = RegionKind::NinePatch { splits: [1, 1, 1, 1], pads: None };
        assert_eq!(output_path(&icon(-1, kind)).unwrap(), PathBuf::from("icon.9.png"));
        assert_eq!(output_path(&icon(0, kind)).unwrap(), PathBuf::from("icon_0.9.png"));
    }

    #[test]
    fn test_nested_names() {
        let mut region = icon(-1, RegionKind::Plain);
        region.name = "ui/buttons/ok".to_string();
        assert_eq!(output_path(&region).unwrap(), PathBuf::from("ui").join("buttons").join("ok.png"));
    }

    #[test]
    fn test_escaping_names_are_rejected() {
        let mut region = icon(-1, RegionKind::Plain);
        for name in ["../evil", "/abs/path", "a/../../b", "  "] {
            region.name = name.to_string();
            assert!(
                matches!(output_path(&region), Err(AtlasError::MalformedRegion { .. })),
                "name {:?} should be rejected",
                name
            );
        }
    }
}
