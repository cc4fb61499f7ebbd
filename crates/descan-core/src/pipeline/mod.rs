pub mod engine;
pub mod lens;
pub mod session;
pub mod stages;
pub mod state;

pub use lens::{PointerEvent, Scroll};
pub use session::Session;
pub use state::PipelineState;

use crate::error::{DescanError, Result};
use crate::raster::Raster;

/// One ordered step of the fixed seven-stage pipeline. The
/// discriminant is the stage's cache slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Edge-preserving bilateral smoothing.
    Denoise = 1,
    /// Pad with background, crop to content plus margin.
    BorderCrop = 2,
    /// Aspect-preserving cubic rescale to the target size.
    Rescale = 3,
    /// Constant-pad then Gaussian blur.
    Blur = 4,
    /// Linear contrast remap about a pivot.
    Contrast = 5,
    /// Tight crop to content.
    Crop = 6,
    /// Hard black/white threshold.
    Binarize = 7,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 7] = [
        Stage::Denoise,
        Stage::BorderCrop,
        Stage::Rescale,
        Stage::Blur,
        Stage::Contrast,
        Stage::Crop,
        Stage::Binarize,
    ];

    /// Cache slot index this stage writes (1..=7).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Stage> {
        Stage::ALL
            .get(index.wrapping_sub(1))
            .copied()
            .ok_or(DescanError::StageOutOfRange(index))
    }

    /// The stage whose output this stage consumes, if any.
    pub fn prev(self) -> Option<Stage> {
        Stage::from_index(self.index() - 1).ok()
    }
}

/// Which preview surface an image is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewImage {
    /// The latest full pipeline result (possibly lens-marked).
    Output,
    /// The magnified crop under the pointer.
    Lens,
}

/// Receiver for preview images.
///
/// Called once per successful recompute with the new final result, and
/// on every lens update with the magnified crop plus the marked full
/// image. Display failures stay on the sink's side; nothing propagates
/// back into the pipeline.
pub trait PreviewSink {
    fn publish(&mut self, which: PreviewImage, image: &Raster);
}

/// Sink that discards every preview. Used by batch drivers and tests.
pub struct NullSink;

impl PreviewSink for NullSink {
    fn publish(&mut self, _which: PreviewImage, _image: &Raster) {}
}
