use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BILATERAL_DIAMETER, DEFAULT_BILATERAL_SIGMA_COLOR, DEFAULT_BILATERAL_SIGMA_SPACE,
    DEFAULT_BINARY_THRESHOLD, DEFAULT_BORDER, DEFAULT_CONTRAST_ALPHA, DEFAULT_CONTRAST_BETA,
    DEFAULT_KERNEL_PERCENT, DEFAULT_TARGET_SIZE, DEFAULT_THRESHOLD_BLACK,
    DEFAULT_THRESHOLD_WHITE,
};
use crate::pipeline::Stage;

/// All tunable knobs of one pipeline run.
///
/// Created once per source image, mutated in place by control events,
/// and reset to defaults on request. `resizing_rate` is derived during
/// stage 3, not set by any control.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Long edge of the rescaled image (stage 3), clamped to
    /// [`crate::consts::MIN_TARGET_SIZE`].
    pub target_size: usize,
    /// Blur kernel size as a percentage of the target size; only used
    /// to re-derive `kernel_size` on reset.
    pub kernel_percent: f64,
    /// Gaussian blur kernel size (stage 4); forced odd before use.
    pub kernel_size: usize,
    /// Lower bound of the content intensity range (stages 2 and 6).
    pub threshold_black: u8,
    /// Upper bound of the content intensity range (stages 2 and 6).
    pub threshold_white: u8,
    /// Margin kept around detected content, in source pixels (stage 2).
    pub border: usize,
    /// Contrast gain in hundredths (stage 5): 100 = gain 1.0.
    pub contrast_alpha: u32,
    /// Contrast pivot in hundredths (stage 5): 60 = pivot 0.6.
    pub contrast_beta: u32,
    /// Bilateral filter neighborhood diameter (stage 1).
    pub bilateral_diameter: usize,
    /// Bilateral filter intensity sigma (stage 1).
    pub bilateral_sigma_color: f64,
    /// Bilateral filter spatial sigma (stage 1).
    pub bilateral_sigma_space: f64,
    /// Binarization cutover (stage 7): below becomes black, the rest
    /// white.
    pub binary_threshold: u8,
    /// Approximate scale factor of stage 3, derived there as
    /// target size / source long edge.
    #[serde(skip)]
    pub resizing_rate: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            kernel_percent: DEFAULT_KERNEL_PERCENT,
            kernel_size: derive_kernel_size(DEFAULT_TARGET_SIZE, DEFAULT_KERNEL_PERCENT),
            threshold_black: DEFAULT_THRESHOLD_BLACK,
            threshold_white: DEFAULT_THRESHOLD_WHITE,
            border: DEFAULT_BORDER,
            contrast_alpha: DEFAULT_CONTRAST_ALPHA,
            contrast_beta: DEFAULT_CONTRAST_BETA,
            bilateral_diameter: DEFAULT_BILATERAL_DIAMETER,
            bilateral_sigma_color: DEFAULT_BILATERAL_SIGMA_COLOR,
            bilateral_sigma_space: DEFAULT_BILATERAL_SIGMA_SPACE,
            binary_threshold: DEFAULT_BINARY_THRESHOLD,
            resizing_rate: 0.0,
        }
    }
}

impl Params {
    /// Restore every knob to its default and re-derive the blur kernel
    /// size from the (default) target size.
    pub fn reset(&mut self) {
        *self = Params::default();
    }
}

/// Kernel size derived from the target size: always odd, grows with
/// the rescaled image so the blur covers the same physical fraction.
pub fn derive_kernel_size(target_size: usize, percent: f64) -> usize {
    (target_size as f64 / (percent * 200.0)) as usize * 2 + 1
}

/// A single parameter-change event from the control surface.
///
/// Each control carries its new value and maps to the first stage
/// whose output it affects; the recompute engine reruns that stage and
/// everything downstream of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control {
    BilateralDiameter(usize),
    BilateralSigmaColor(f64),
    BilateralSigmaSpace(f64),
    ThresholdBlack(u8),
    ThresholdWhite(u8),
    Border(usize),
    TargetSize(usize),
    KernelSize(usize),
    ContrastAlpha(u32),
    ContrastBeta(u32),
    BinaryThreshold(u8),
}

impl Control {
    /// First pipeline stage invalidated by this control.
    pub fn stage(self) -> Stage {
        match self {
            Control::BilateralDiameter(_)
            | Control::BilateralSigmaColor(_)
            | Control::BilateralSigmaSpace(_) => Stage::Denoise,
            Control::ThresholdBlack(_) | Control::ThresholdWhite(_) | Control::Border(_) => {
                Stage::BorderCrop
            }
            Control::TargetSize(_) => Stage::Rescale,
            Control::KernelSize(_) => Stage::Blur,
            Control::ContrastAlpha(_) | Control::ContrastBeta(_) => Stage::Contrast,
            Control::BinaryThreshold(_) => Stage::Binarize,
        }
    }

    /// Store the new value into the parameter set.
    pub fn apply(self, params: &mut Params) {
        match self {
            Control::BilateralDiameter(v) => params.bilateral_diameter = v,
            Control::BilateralSigmaColor(v) => params.bilateral_sigma_color = v,
            Control::BilateralSigmaSpace(v) => params.bilateral_sigma_space = v,
            Control::ThresholdBlack(v) => params.threshold_black = v,
            Control::ThresholdWhite(v) => params.threshold_white = v,
            Control::Border(v) => params.border = v,
            Control::TargetSize(v) => params.target_size = v,
            Control::KernelSize(v) => params.kernel_size = v,
            Control::ContrastAlpha(v) => params.contrast_alpha = v,
            Control::ContrastBeta(v) => params.contrast_beta = v,
            Control::BinaryThreshold(v) => params.binary_threshold = v,
        }
    }
}
