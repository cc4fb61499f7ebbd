use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::raster::Raster;

/// Edge-preserving bilateral smoothing.
///
/// Each output pixel is a weighted average over a square neighborhood
/// of `diameter` pixels; the weight combines a spatial Gaussian
/// (`sigma_space`) with an intensity-difference Gaussian
/// (`sigma_color`), so flat regions are smoothed while strong edges
/// survive. Samples outside the image are clamped to the nearest edge
/// pixel.
pub fn bilateral_filter(
    image: &Raster,
    diameter: usize,
    sigma_color: f64,
    sigma_space: f64,
) -> Raster {
    let (h, w) = image.data.dim();
    let radius = (diameter.max(1) / 2) as isize;
    let sigma_color = if sigma_color > 0.0 { sigma_color } else { 1.0 };
    let sigma_space = if sigma_space > 0.0 { sigma_space } else { 1.0 };

    // Intensity weight for every possible absolute difference.
    let color_lut: Vec<f64> = (0..256i64)
        .map(|d| (-((d * d) as f64) / (2.0 * sigma_color * sigma_color)).exp())
        .collect();

    // Spatial weight for every neighborhood offset.
    let mut offsets = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d2 = (dy * dy + dx * dx) as f64;
            offsets.push((dy, dx, (-d2 / (2.0 * sigma_space * sigma_space)).exp()));
        }
    }

    let filter_row = |y: usize| -> Vec<u8> {
        (0..w)
            .map(|x| {
                let center = image.data[[y, x]];
                let mut num = 0.0f64;
                let mut den = 0.0f64;
                for &(dy, dx, spatial) in &offsets {
                    let sy = (y as isize + dy).clamp(0, h as isize - 1) as usize;
                    let sx = (x as isize + dx).clamp(0, w as isize - 1) as usize;
                    let p = image.data[[sy, sx]];
                    let weight =
                        spatial * color_lut[(p as i32 - center as i32).unsigned_abs() as usize];
                    num += weight * p as f64;
                    den += weight;
                }
                (num / den).round().clamp(0.0, 255.0) as u8
            })
            .collect()
    };

    let rows: Vec<Vec<u8>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(filter_row).collect()
    } else {
        (0..h).map(filter_row).collect()
    };

    let mut result = Array2::<u8>::zeros((h, w));
    for (y, row) in rows.into_iter().enumerate() {
        for (x, val) in row.into_iter().enumerate() {
            result[[y, x]] = val;
        }
    }
    Raster::new(result)
}
