use crate::consts::STAGE_COUNT;
use crate::params::Params;
use crate::raster::Raster;

use super::lens::LensState;

/// All mutable state of one pipeline run: the stage cache, the live
/// parameter set, and the lens overlay.
///
/// Slot 0 holds the grayscale, orientation-normalized source image;
/// slots 1..=7 hold stage outputs. The cache has no gaps: every
/// present slot is valid, and invalidation truncates the vector
/// instead of leaving stale entries behind.
pub struct PipelineState {
    pub(crate) cache: Vec<Raster>,
    pub params: Params,
    pub(crate) lens: LensState,
    /// How many times each stage has executed, indexed by stage
    /// number. Diagnostic only.
    pub stage_runs: [usize; STAGE_COUNT + 1],
}

impl PipelineState {
    pub fn new(source: Raster, params: Params) -> Self {
        Self {
            cache: vec![source],
            params,
            lens: LensState::default(),
            stage_runs: [0; STAGE_COUNT + 1],
        }
    }

    /// Number of cached slots, source included.
    pub fn cached_slots(&self) -> usize {
        self.cache.len()
    }

    /// Index of the newest cached image. Slot 0 is always present.
    pub fn latest_slot(&self) -> usize {
        self.cache.len() - 1
    }

    pub fn slot(&self, index: usize) -> Option<&Raster> {
        self.cache.get(index)
    }

    /// XOR the lens mask back out of its slot, restoring the original
    /// pixels. With `clear` the mask is dropped; otherwise it is
    /// zeroed for reuse. Returns whether a mask was removed.
    pub(crate) fn remove_lens_overlay(&mut self, clear: bool) -> bool {
        let Some(mut mask) = self.lens.mask.take() else {
            return false;
        };
        let slot = self.lens.slot;
        debug_assert!(slot < self.cache.len());
        let removed = if slot < self.cache.len() {
            self.cache[slot].xor_assign(&mask);
            true
        } else {
            false
        };
        if !clear {
            mask.data.fill(0);
            self.lens.mask = Some(mask);
        }
        removed
    }
}
