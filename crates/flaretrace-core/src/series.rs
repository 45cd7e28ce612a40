use chrono::NaiveDateTime;
use ndarray::Array2;

use crate::error::{FlareError, Result};
use crate::frame::Frame;
use crate::image::{abs_diff, rotate};

/// One (timestamp, scalar) sample of the brightness-change series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesEntry {
    pub time: NaiveDateTime,
    pub value: f64,
}

/// Build the brightness-change series over `pair_count` consecutive
/// frame pairs.
///
/// For each pair (i, i+1): absolute difference, rotation by Frame[i]'s
/// roll angle, then the pixel sum inside the mask. Each scalar is
/// stamped with Frame[i+1]'s observation time. `on_pair` is called with
/// the number of pairs processed so far.
pub fn build_series(
    frames: &[Frame],
    mask: &Array2<bool>,
    pair_count: usize,
    mut on_pair: impl FnMut(usize),
) -> Result<Vec<SeriesEntry>> {
    if frames.len() < pair_count + 1 {
        return Err(FlareError::NotEnoughFrames {
            found: frames.len(),
            required: pair_count + 1,
        });
    }

    let mut series = Vec::with_capacity(pair_count);
    for i in 0..pair_count {
        let diff = abs_diff(&frames[i + 1].data, &frames[i].data)?;
        let rotated = rotate(&diff, frames[i].roll_angle);
        let value = masked_sum(&rotated, mask)?;
        series.push(SeriesEntry {
            time: frames[i + 1].obs_time,
            value,
        });
        on_pair(i + 1);
    }
    Ok(series)
}

/// Sum of the pixels where the mask is true, accumulated in f64.
pub fn masked_sum(data: &Array2<f32>, mask: &Array2<bool>) -> Result<f64> {
    let (dh, dw) = data.dim();
    let (mh, mw) = mask.dim();
    if (dh, dw) != (mh, mw) {
        return Err(FlareError::ShapeMismatch(dh, dw, mh, mw));
    }

    let sum = ndarray::Zip::from(data)
        .and(mask)
        .fold(0.0f64, |acc, &v, &m| if m { acc + v as f64 } else { acc });
    Ok(sum)
}

/// Normalize the series by its maximum so the peak is 1.0.
///
/// A maximum of zero means the mask was empty or nothing changed; that
/// is reported as a degenerate-series error rather than letting
/// non-finite values flow into the chart.
pub fn normalize(series: &[SeriesEntry]) -> Result<Vec<SeriesEntry>> {
    let max = series
        .iter()
        .map(|e| e.value)
        .fold(f64::NEG_INFINITY, f64::max);
    if series.is_empty() || max <= 0.0 || !max.is_finite() {
        return Err(FlareError::DegenerateSeries);
    }

    Ok(series
        .iter()
        .map(|e| SeriesEntry {
            time: e.time,
            value: e.value / max,
        })
        .collect())
}
