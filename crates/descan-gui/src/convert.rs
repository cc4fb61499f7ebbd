use descan_core::raster::Raster;

/// Convert a grayscale Raster to an egui ColorImage.
pub fn raster_to_color_image(raster: &Raster) -> egui::ColorImage {
    let h = raster.height();
    let w = raster.width();
    let mut pixels = Vec::with_capacity(h * w);

    for &v in raster.data.iter() {
        pixels.push(egui::Color32::from_gray(v));
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}
