use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::consts::OBS_TIME_FORMAT;
use crate::error::{FlareError, Result};
use crate::frame::Frame;
use crate::io::fits::FitsReader;

/// Parse a DATE-OBS value. The format is fixed; anything else is an error.
pub fn parse_obs_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, OBS_TIME_FORMAT).map_err(|err| {
        FlareError::InvalidTimestamp {
            value: value.to_string(),
            reason: err.to_string(),
        }
    })
}

/// Load a single FITS file into a Frame.
///
/// The archive's CRDER1/CRDER2 coordinate-error estimates are discarded
/// and pinned to zero; they are not meaningful for difference imaging.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let reader = FitsReader::open(path)?;
    let data = reader.read_image()?;

    let obs_raw = reader
        .header
        .string_value("DATE-OBS")
        .ok_or_else(|| FlareError::MissingKeyword("DATE-OBS".to_string()))?;
    let obs_time = parse_obs_time(&obs_raw)?;
    let roll_angle = reader.header.float_value("CROTA2")?;

    debug!(
        path = %path.display(),
        width = data.ncols(),
        height = data.nrows(),
        %obs_time,
        roll_angle,
        "loaded frame"
    );

    Ok(Frame {
        data,
        obs_time,
        roll_angle,
        crder1: 0.0,
        crder2: 0.0,
        path: path.to_path_buf(),
    })
}

/// Load every path into a Frame, order-preserving. `on_loaded` is called
/// with the number of frames loaded so far after each file.
pub fn load_frames(
    paths: &[PathBuf],
    mut on_loaded: impl FnMut(usize),
) -> Result<Vec<Frame>> {
    let mut frames = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        frames.push(load_frame(path)?);
        on_loaded(i + 1);
    }
    Ok(frames)
}
