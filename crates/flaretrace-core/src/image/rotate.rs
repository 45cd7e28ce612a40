use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Rotate an image by `angle_deg` degrees about its center, keeping the
/// original shape. Output pixels are inverse-mapped into the source and
/// sampled bilinearly; samples falling outside the source are zero.
pub fn rotate(data: &Array2<f32>, angle_deg: f64) -> Array2<f32> {
    let (h, w) = data.dim();
    let theta = angle_deg.to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    let rotate_row = |row: usize| -> Vec<f32> {
        let dy = row as f64 - cy;
        (0..w)
            .map(|col| {
                let dx = col as f64 - cx;
                let sx = cos_t * dx - sin_t * dy + cx;
                let sy = sin_t * dx + cos_t * dy + cy;
                sample_bilinear(data, sy, sx)
            })
            .collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h).into_par_iter().map(rotate_row).collect();
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
    } else {
        for row in 0..h {
            for (col, val) in rotate_row(row).into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
    }
    result
}

fn sample_bilinear(data: &Array2<f32>, y: f64, x: f64) -> f32 {
    let (h, w) = data.dim();
    let x0f = x.floor();
    let y0f = y.floor();
    let tx = (x - x0f) as f32;
    let ty = (y - y0f) as f32;
    let x0 = x0f as isize;
    let y0 = y0f as isize;

    let at = |r: isize, c: isize| -> f32 {
        if r < 0 || c < 0 || r >= h as isize || c >= w as isize {
            0.0
        } else {
            data[[r as usize, c as usize]]
        }
    };

    let top = at(y0, x0) * (1.0 - tx) + at(y0, x0 + 1) * tx;
    let bottom = at(y0 + 1, x0) * (1.0 - tx) + at(y0 + 1, x0 + 1) * tx;
    top * (1.0 - ty) + bottom * ty
}
