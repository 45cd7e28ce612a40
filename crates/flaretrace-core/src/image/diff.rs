use ndarray::Array2;

use crate::error::{FlareError, Result};

/// Elementwise |a - b| with non-finite results zeroed.
///
/// Symmetric in its arguments: abs_diff(a, b) == abs_diff(b, a).
pub fn abs_diff(a: &Array2<f32>, b: &Array2<f32>) -> Result<Array2<f32>> {
    let (ah, aw) = a.dim();
    let (bh, bw) = b.dim();
    if (ah, aw) != (bh, bw) {
        return Err(FlareError::ShapeMismatch(ah, aw, bh, bw));
    }

    let diff = ndarray::Zip::from(a).and(b).map_collect(|&x, &y| {
        let d = (x - y).abs();
        if d.is_finite() {
            d
        } else {
            0.0
        }
    });

    Ok(diff)
}
