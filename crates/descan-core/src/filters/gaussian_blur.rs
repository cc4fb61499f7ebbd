use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::raster::Raster;

/// Gaussian blur with an explicit odd kernel size, using separable 1D
/// convolution. Edge samples are clamped to the image border.
pub fn gaussian_blur(image: &Raster, kernel_size: usize) -> Raster {
    let kernel = make_kernel(kernel_size);
    let row_pass = convolve_rows(&image.data, &kernel);
    let blurred = convolve_cols(&row_pass, &kernel);
    Raster::new(blurred.mapv(|v| v.round().clamp(0.0, 255.0) as u8))
}

/// Sigma derived from the kernel size, matching the common convention
/// for blurs specified by kernel width alone.
fn sigma_for_kernel(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

fn make_kernel(kernel_size: usize) -> Vec<f64> {
    let size = kernel_size.max(1) | 1;
    let radius = size / 2;
    let sigma = sigma_for_kernel(size).max(0.1);
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f64; size];
    let mut sum = 0.0f64;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f64 - radius as f64;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<u8>, kernel: &[f64]) -> Array2<f64> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let convolve_row = |row: usize| -> Vec<f64> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f64;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = (col as isize + ki as isize - radius as isize)
                        .clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] as f64 * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    collect_rows(rows, h, w)
}

fn convolve_cols(data: &Array2<f64>, kernel: &[f64]) -> Array2<f64> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let convolve_row = |row: usize| -> Vec<f64> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f64;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = (row as isize + ki as isize - radius as isize)
                        .clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    collect_rows(rows, h, w)
}

fn collect_rows(rows: Vec<Vec<f64>>, h: usize, w: usize) -> Array2<f64> {
    let mut result = Array2::<f64>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
