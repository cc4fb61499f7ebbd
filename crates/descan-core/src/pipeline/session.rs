use std::sync::Mutex;

use tracing::debug;

use crate::consts::STAGE_COUNT;
use crate::error::{DescanError, Result};
use crate::params::{Control, Params};
use crate::raster::Raster;

use super::engine::recompute;
use super::lens::{pointer_update, PointerEvent};
use super::state::PipelineState;
use super::{PreviewSink, Stage};

/// One interactive pipeline run over a single source image.
///
/// Every entry point funnels through a non-blocking lock on the
/// pipeline state: an event arriving while a recompute is in flight is
/// dropped rather than queued, so rapid control manipulation (slider
/// dragging) cannot build an unbounded backlog. The lock belongs to
/// the session instance, not the process; concurrent sessions in batch
/// mode never contend with each other.
pub struct Session {
    state: Mutex<PipelineState>,
}

impl Session {
    /// Start a session over a non-empty, grayscale,
    /// orientation-normalized source image.
    pub fn new(source: Raster, params: Params) -> Result<Self> {
        if source.is_empty() {
            return Err(DescanError::InvalidDimensions {
                width: source.width() as u32,
                height: source.height() as u32,
            });
        }
        Ok(Self {
            state: Mutex::new(PipelineState::new(source, params)),
        })
    }

    /// Apply a parameter change and recompute the affected pipeline
    /// suffix. Returns `Ok(false)` when the event was dropped because
    /// a recompute was already running.
    pub fn on_control(&self, control: Control, sink: &mut dyn PreviewSink) -> Result<bool> {
        let Ok(mut state) = self.state.try_lock() else {
            debug!(?control, "recompute in flight, control event dropped");
            return Ok(false);
        };
        control.apply(&mut state.params);
        recompute(&mut state, control.stage(), sink)?;
        Ok(true)
    }

    /// Recompute from `stage` onward with the current parameters.
    /// Returns `Ok(false)` when dropped due to contention.
    pub fn trigger(&self, stage: Stage, sink: &mut dyn PreviewSink) -> Result<bool> {
        let Ok(mut state) = self.state.try_lock() else {
            debug!(stage = stage.index(), "recompute in flight, trigger dropped");
            return Ok(false);
        };
        recompute(&mut state, stage, sink)?;
        Ok(true)
    }

    /// Run the whole pipeline (equivalent to triggering the final
    /// stage; missing prerequisites are filled in automatically).
    pub fn run_all(&self, sink: &mut dyn PreviewSink) -> Result<bool> {
        self.trigger(Stage::Binarize, sink)
    }

    /// Reset every knob to its default, re-deriving the blur kernel
    /// size from the target size. Does not recompute. Returns false
    /// when dropped due to contention.
    pub fn reset(&self) -> bool {
        let Ok(mut state) = self.state.try_lock() else {
            return false;
        };
        state.params.reset();
        true
    }

    /// Pointer move/scroll over the preview: update the lens overlay
    /// on the latest cached result. Dropped (returns false) while a
    /// recompute holds the state.
    pub fn on_pointer(&self, event: PointerEvent, sink: &mut dyn PreviewSink) -> bool {
        let Ok(mut state) = self.state.try_lock() else {
            return false;
        };
        pointer_update(&mut state, event, sink);
        true
    }

    /// Tell the lens how large its viewport is, in preview pixels.
    pub fn set_lens_viewport(&self, width: usize, height: usize) {
        if let Ok(mut state) = self.state.try_lock() {
            state.lens.viewport = (width.max(1), height.max(1));
        }
    }

    /// Force a final full recompute if the binarized result is not
    /// cached yet, strip the lens overlay, and return the final image
    /// for persistence.
    pub fn finish(&self, sink: &mut dyn PreviewSink) -> Result<Raster> {
        let mut state = self.lock();
        if state.cached_slots() != STAGE_COUNT + 1 {
            recompute(&mut state, Stage::Binarize, sink)?;
        }
        if state.cached_slots() != STAGE_COUNT + 1 {
            return Err(DescanError::Pipeline(
                "final stage produced no result".into(),
            ));
        }
        state.remove_lens_overlay(true);
        Ok(state.cache[STAGE_COUNT].clone())
    }

    /// Snapshot of the current parameter set.
    pub fn params(&self) -> Params {
        self.lock().params.clone()
    }

    /// Snapshot of the per-stage execution counters.
    pub fn stage_runs(&self) -> [usize; STAGE_COUNT + 1] {
        self.lock().stage_runs
    }

    /// Number of cached slots, source included.
    pub fn cached_slots(&self) -> usize {
        self.lock().cached_slots()
    }

    /// Clone of the newest cached image (lens marker included, if one
    /// is active).
    pub fn latest_preview(&self) -> Raster {
        let state = self.lock();
        state.cache[state.latest_slot()].clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PipelineState> {
        // A poisoned lock means a stage panicked; the cache invariant
        // (truncate before push) still holds, so keep going.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
