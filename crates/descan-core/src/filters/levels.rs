use crate::raster::Raster;

/// Linear contrast remap about a pivot:
/// `out = ((in/255 - pivot) * gain + pivot) * 255`, clamped to
/// `[0, 255]`. Monotonic in the input for any positive gain.
pub fn contrast_brightness(image: &Raster, gain: f64, pivot: f64) -> Raster {
    Raster::new(image.data.mapv(|p| {
        let normalized = p as f64 / 255.0;
        let remapped = (normalized - pivot) * gain + pivot;
        ((remapped * 255.0) as i32).clamp(0, 255) as u8
    }))
}
