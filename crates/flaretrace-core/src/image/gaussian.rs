use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{GAUSSIAN_TRUNCATE, PARALLEL_PIXEL_THRESHOLD};

/// Isotropic Gaussian smoothing via separable 1D convolution with
/// reflected boundaries. Shape is preserved.
pub fn gaussian_blur(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

/// Normalized 1D Gaussian, truncated at `GAUSSIAN_TRUNCATE` standard
/// deviations: radius = truncate * sigma + 0.5.
fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Mirror an out-of-range index back into [0, n). Folds repeatedly, so
/// kernels wider than the image are fine.
fn reflect_index(mut i: isize, n: isize) -> usize {
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| {
                (0..w)
                    .map(|col| {
                        let mut sum = 0.0f32;
                        for (ki, &kv) in kernel.iter().enumerate() {
                            let src_col = reflect_index(
                                col as isize + ki as isize - radius as isize,
                                w as isize,
                            );
                            sum += data[[row, src_col]] * kv;
                        }
                        sum
                    })
                    .collect()
            })
            .collect();

        collect_rows(rows, h, w)
    } else {
        let mut result = Array2::<f32>::zeros((h, w));
        for row in 0..h {
            for col in 0..w {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = reflect_index(
                        col as isize + ki as isize - radius as isize,
                        w as isize,
                    );
                    sum += data[[row, src_col]] * kv;
                }
                result[[row, col]] = sum;
            }
        }
        result
    }
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| {
                (0..w)
                    .map(|col| {
                        let mut sum = 0.0f32;
                        for (ki, &kv) in kernel.iter().enumerate() {
                            let src_row = reflect_index(
                                row as isize + ki as isize - radius as isize,
                                h as isize,
                            );
                            sum += data[[src_row, col]] * kv;
                        }
                        sum
                    })
                    .collect()
            })
            .collect();

        collect_rows(rows, h, w)
    } else {
        let mut result = Array2::<f32>::zeros((h, w));
        for row in 0..h {
            for col in 0..w {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = reflect_index(
                        row as isize + ki as isize - radius as isize,
                        h as isize,
                    );
                    sum += data[[src_row, col]] * kv;
                }
                result[[row, col]] = sum;
            }
        }
        result
    }
}

fn collect_rows(rows: Vec<Vec<f32>>, h: usize, w: usize) -> Array2<f32> {
    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
