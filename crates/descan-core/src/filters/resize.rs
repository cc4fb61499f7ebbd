use image::imageops::{self, FilterType};

use crate::raster::Raster;

/// Output dimensions `(width, height)` that put the long edge at
/// `target` pixels while preserving aspect ratio. Both dimensions are
/// kept at least 1.
pub fn scaled_dimensions(width: usize, height: usize, target: usize) -> (usize, usize) {
    let target = target.max(1);
    if height > width {
        let w = ((width as f64 / height as f64) * target as f64) as usize;
        (w.max(1), target)
    } else {
        let h = ((height as f64 / width.max(1) as f64) * target as f64) as usize;
        (target, h.max(1))
    }
}

/// Rescale with Catmull-Rom (cubic) resampling.
pub fn resize_cubic(image: &Raster, new_width: usize, new_height: usize) -> Raster {
    let buf = image.to_luma8();
    let resized = imageops::resize(
        &buf,
        new_width.max(1) as u32,
        new_height.max(1) as u32,
        FilterType::CatmullRom,
    );
    Raster::from_luma8(&resized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions_portrait() {
        assert_eq!(scaled_dimensions(100, 200, 400), (200, 400));
    }

    #[test]
    fn test_scaled_dimensions_landscape() {
        assert_eq!(scaled_dimensions(200, 100, 400), (400, 200));
    }

    #[test]
    fn test_scaled_dimensions_square_long_edge_is_width() {
        assert_eq!(scaled_dimensions(50, 50, 300), (300, 300));
    }

    #[test]
    fn test_scaled_dimensions_never_zero() {
        assert_eq!(scaled_dimensions(1000, 1, 10), (10, 1));
    }

    #[test]
    fn test_resize_uniform_image() {
        let img = Raster::from_elem(20, 10, 90);
        let out = resize_cubic(&img, 30, 60);
        assert_eq!((out.width(), out.height()), (30, 60));
        assert!(out.data.iter().all(|&p| p == 90));
    }
}
