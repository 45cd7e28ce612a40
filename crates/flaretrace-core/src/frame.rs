use chrono::NaiveDateTime;
use ndarray::Array2;
use std::path::PathBuf;

/// A single calibrated intensity frame.
/// Pixel values are f32 in the instrument's raw units after BSCALE/BZERO.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Observation start time parsed from DATE-OBS
    pub obs_time: NaiveDateTime,
    /// Detector roll angle in degrees parsed from CROTA2
    pub roll_angle: f64,
    /// CRDER1 coordinate error, pinned to zero at load
    pub crder1: f64,
    /// CRDER2 coordinate error, pinned to zero at load
    pub crder2: f64,
    /// Path the frame was loaded from
    pub path: PathBuf,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Metadata about a FITS source file.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bitpix: i64,
    pub obs_time: Option<String>,
    pub roll_angle: Option<f64>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}
