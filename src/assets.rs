//! Asset lookup and decoding at the collaborator boundary.

use std::path::Path;

use anyhow::Context as _;

use crate::error::{EmberfallError, EmberfallResult};
use crate::mask::ThresholdPolicy;
use crate::raster::RasterImage;

/// Recognized asset names with their threshold policies.
///
/// Values are part of the rendering contract; changing one changes which
/// pixels survive the cut-out.
const POLICIES: &[(&str, ThresholdPolicy)] = &[
    ("groot", ThresholdPolicy::fixed(250, true)),
    ("hulk", ThresholdPolicy::fixed(240, true)),
    ("perry", ThresholdPolicy::fixed(40, false)),
    ("joseph", ThresholdPolicy::fixed(254, true)),
    ("closed_wings", ThresholdPolicy::fixed(60, false)),
    ("open_wings", ThresholdPolicy::fixed(120, false)),
    ("fireball", ThresholdPolicy::fixed(254, true)),
];

/// Look up the threshold policy for a named asset.
///
/// Unknown names fail immediately, before any rendering starts.
pub fn policy_for(name: &str) -> EmberfallResult<ThresholdPolicy> {
    POLICIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, p)| p)
        .ok_or_else(|| {
            EmberfallError::config(format!(
                "unknown asset '{name}' (expected one of: {})",
                known_assets().join(", ")
            ))
        })
}

pub fn known_assets() -> Vec<&'static str> {
    POLICIES.iter().map(|&(n, _)| n).collect()
}

/// Character names a scenario may fly (wings and fireball are fixed props).
pub fn character_names() -> Vec<&'static str> {
    POLICIES
        .iter()
        .map(|&(n, _)| n)
        .filter(|n| !matches!(*n, "closed_wings" | "open_wings" | "fireball"))
        .collect()
}

/// Decode a sprite image from disk into an RGB raster.
pub fn load_sprite(path: &Path) -> EmberfallResult<RasterImage> {
    let img = image::open(path)
        .with_context(|| format!("decode sprite '{}'", path.display()))?
        .to_rgb8();
    let raster = RasterImage::from_rgb_image(&img);
    if raster.is_empty() {
        return Err(EmberfallError::invalid_image(format!(
            "sprite '{}' has zero dimensions",
            path.display()
        )));
    }
    Ok(raster)
}
