use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FILE_PATTERN, DEFAULT_OUTPUT_FILE, DEFAULT_PAIR_COUNT, DEFAULT_REFERENCE_FRAME,
    FLARE_TIME_FORMAT,
};
use crate::error::{FlareError, Result};
use crate::roi::RoiConfig;

/// Configuration for a full analysis run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory containing the observation FITS files.
    pub input_dir: PathBuf,
    /// Filename glob applied inside `input_dir`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Flare peak time in YYYY-MM-DDTHH:MM format.
    pub flare_time: String,
    /// Chart output path, written as SVG.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Index of the reference frame used for ROI detection and the
    /// chart title.
    #[serde(default = "default_reference_frame")]
    pub reference_frame: usize,
    /// Number of consecutive frame pairs in the series.
    #[serde(default = "default_pair_count")]
    pub pair_count: usize,
    /// Flare-region detection parameters.
    #[serde(default)]
    pub roi: RoiConfig,
}

fn default_pattern() -> String {
    DEFAULT_FILE_PATTERN.to_string()
}
fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}
fn default_reference_frame() -> usize {
    DEFAULT_REFERENCE_FRAME
}
fn default_pair_count() -> usize {
    DEFAULT_PAIR_COUNT
}

impl AnalysisConfig {
    /// The flare peak time, parsed. The format is fixed.
    pub fn flare_time(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.flare_time, FLARE_TIME_FORMAT).map_err(|err| {
            FlareError::InvalidTimestamp {
                value: self.flare_time.clone(),
                reason: err.to_string(),
            }
        })
    }

    /// Check the run parameters before touching any data.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(FlareError::InvalidConfig(format!(
                "input directory {} does not exist",
                self.input_dir.display()
            )));
        }
        self.flare_time()?;
        if self.pair_count == 0 {
            return Err(FlareError::InvalidConfig(
                "pair_count must be at least 1".to_string(),
            ));
        }
        if !(self.roi.blur_sigma.is_finite() && self.roi.blur_sigma > 0.0) {
            return Err(FlareError::InvalidConfig(format!(
                "blur_sigma must be positive and finite, got {}",
                self.roi.blur_sigma
            )));
        }
        if !(self.roi.threshold_fraction > 0.0 && self.roi.threshold_fraction <= 1.0) {
            return Err(FlareError::InvalidConfig(format!(
                "threshold_fraction must be in (0, 1], got {}",
                self.roi.threshold_fraction
            )));
        }
        Ok(())
    }
}
