use crate::raster::Raster;

/// Hard binarization: pixels below `threshold` become pure black,
/// everything else pure white. No dithering.
pub fn binarize(image: &Raster, threshold: u8) -> Raster {
    Raster::new(image.data.mapv(|p| if p < threshold { 0 } else { 255 }))
}
