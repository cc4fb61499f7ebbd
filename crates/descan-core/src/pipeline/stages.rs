use crate::consts::{MIN_TARGET_SIZE, PAD_VALUE};
use crate::error::{DescanError, Result};
use crate::filters::bilateral::bilateral_filter;
use crate::filters::gaussian_blur::gaussian_blur;
use crate::filters::levels::contrast_brightness;
use crate::filters::resize::{resize_cubic, scaled_dimensions};
use crate::filters::threshold::binarize;
use crate::geometry::bounding_box;
use crate::params::Params;
use crate::raster::Raster;

use super::Stage;

/// Execute one stage transform over the earlier cache slots.
///
/// `slots` must hold exactly the results 0..stage; the caller pushes
/// the returned raster as the stage's own slot. Stages 3 and 4 also
/// write derived values (resizing rate, forced-odd kernel size) back
/// into the parameter set.
pub fn run(stage: Stage, slots: &[Raster], params: &mut Params) -> Result<Raster> {
    debug_assert_eq!(slots.len(), stage.index());
    let input = slots
        .last()
        .ok_or_else(|| DescanError::Pipeline("stage cache is empty".into()))?;

    Ok(match stage {
        Stage::Denoise => denoise(input, params),
        Stage::BorderCrop => border_crop(input, params),
        Stage::Rescale => rescale(&slots[0], input, params),
        Stage::Blur => blur(input, params),
        Stage::Contrast => contrast(input, params),
        Stage::Crop => crop(input, params),
        Stage::Binarize => binarize(input, params.binary_threshold),
    })
}

/// Stage 1: edge-preserving smoothing of the source.
fn denoise(input: &Raster, params: &Params) -> Raster {
    bilateral_filter(
        input,
        params.bilateral_diameter,
        params.bilateral_sigma_color,
        params.bilateral_sigma_space,
    )
}

/// Stage 2: pad with background, then crop to the bounding box of the
/// content intensity range, re-expanded by the same border.
///
/// The box is computed over the padded image, artificial 255 ring
/// included; with background above the white threshold the ring never
/// widens the box, and the `border` re-expansion restores up to
/// `border` pixels of margin around the content.
fn border_crop(input: &Raster, params: &Params) -> Raster {
    let padded = input.padded(params.border, PAD_VALUE);
    let bbox = bounding_box(
        &padded,
        params.threshold_black,
        params.threshold_white,
        params.border,
    );
    if bbox.is_empty() {
        padded
    } else {
        padded.cropped(&bbox)
    }
}

/// Stage 3: uniform cubic rescale so the long edge reaches the target
/// size plus a proportionally scaled border allowance.
fn rescale(source: &Raster, input: &Raster, params: &mut Params) -> Raster {
    params.target_size = params.target_size.max(MIN_TARGET_SIZE);
    params.resizing_rate = params.target_size as f64 / source.long_edge() as f64;
    let long_edge =
        params.target_size + (params.resizing_rate * params.border as f64 * 2.0) as usize;
    let (w, h) = scaled_dimensions(input.width(), input.height(), long_edge);
    resize_cubic(input, w, h)
}

/// Stage 4: pad by half the kernel on each side, then Gaussian blur.
/// An even kernel size is bumped to the next odd value first.
fn blur(input: &Raster, params: &mut Params) -> Raster {
    if params.kernel_size % 2 == 0 {
        params.kernel_size += 1;
    }
    let padded = input.padded(params.kernel_size / 2, PAD_VALUE);
    gaussian_blur(&padded, params.kernel_size)
}

/// Stage 5: linear contrast remap; knobs are percent-style integers.
fn contrast(input: &Raster, params: &Params) -> Raster {
    contrast_brightness(
        input,
        params.contrast_alpha as f64 / 100.0,
        params.contrast_beta as f64 / 100.0,
    )
}

/// Stage 6: tight crop to content; passes the image through unchanged
/// when nothing falls in the content range.
fn crop(input: &Raster, params: &Params) -> Raster {
    let bbox = bounding_box(input, params.threshold_black, params.threshold_white, 0);
    if bbox.is_empty() {
        input.clone()
    } else {
        input.cropped(&bbox)
    }
}
