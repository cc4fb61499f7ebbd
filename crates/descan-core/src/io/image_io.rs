use std::path::Path;

use image::{imageops, ImageFormat};

use crate::error::{DescanError, Result};
use crate::raster::Raster;

/// Load an image file as 8-bit grayscale, normalized to portrait
/// orientation: landscape inputs are rotated 90 degrees
/// counter-clockwise. Zero-area images are rejected before the
/// pipeline ever sees them.
pub fn load_grayscale(path: &Path) -> Result<Raster> {
    let img = image::open(path)?;
    let mut gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(DescanError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    if w > h {
        gray = imageops::rotate270(&gray);
    }
    Ok(Raster::from_luma8(&gray))
}

/// Save as 8-bit grayscale PNG.
pub fn save_png(raster: &Raster, path: &Path) -> Result<()> {
    raster.to_luma8().save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
