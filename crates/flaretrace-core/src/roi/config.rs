use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLUR_SIGMA, DEFAULT_THRESHOLD_FRACTION, SIGNIFICANT_DIFF_LEVEL};

/// Which connected component becomes the flare region.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ComponentSelection {
    /// The component with the largest pixel area.
    #[default]
    Largest,
    /// The component with this exact label id, counted from 1 in
    /// raster-scan order. A label that does not exist yields an empty
    /// mask rather than an error.
    Label(u32),
}

/// Configuration for flare-region detection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Gaussian smoothing sigma (pixels) for the reference difference image.
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Mask threshold as a fraction of the smoothed maximum.
    #[serde(default = "default_threshold_fraction")]
    pub threshold_fraction: f32,
    /// Raw-difference level above which a pixel counts as significantly
    /// changed (diagnostic only).
    #[serde(default = "default_significance_level")]
    pub significance_level: f32,
    /// Component selection policy.
    #[serde(default)]
    pub selection: ComponentSelection,
}

fn default_blur_sigma() -> f32 {
    DEFAULT_BLUR_SIGMA
}
fn default_threshold_fraction() -> f32 {
    DEFAULT_THRESHOLD_FRACTION
}
fn default_significance_level() -> f32 {
    SIGNIFICANT_DIFF_LEVEL
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            blur_sigma: DEFAULT_BLUR_SIGMA,
            threshold_fraction: DEFAULT_THRESHOLD_FRACTION,
            significance_level: SIGNIFICANT_DIFF_LEVEL,
            selection: ComponentSelection::default(),
        }
    }
}
