use crate::consts::{DEFAULT_LENS_VIEWPORT, DEFAULT_LENS_ZOOM, LENS_THICKNESS_DIVISOR};
use crate::geometry::centered_rect;
use crate::raster::Raster;

use super::state::PipelineState;
use super::{PreviewImage, PreviewSink};

/// Pointer scroll direction over the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scroll {
    /// Double the magnification.
    In,
    /// Halve the magnification.
    Out,
}

/// A pointer move or scroll over the preview surface, in pixel
/// coordinates of the latest cached stage result.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub x: usize,
    pub y: usize,
    pub scroll: Option<Scroll>,
}

/// Transient state of the magnifier overlay.
///
/// At most one mask exists at a time, always tied to a specific cache
/// slot; it must be XORed back out before that slot is read by a
/// recompute or before a mask for another slot is made.
pub struct LensState {
    pub(crate) mask: Option<Raster>,
    /// Cache slot the mask is currently XORed into.
    pub(crate) slot: usize,
    pub(crate) zoom: f32,
    /// Size of the lens pane in preview pixels, set by the front-end.
    pub(crate) viewport: (usize, usize),
}

impl Default for LensState {
    fn default() -> Self {
        Self {
            mask: None,
            slot: 0,
            zoom: DEFAULT_LENS_ZOOM,
            viewport: DEFAULT_LENS_VIEWPORT,
        }
    }
}

/// Handle a pointer move/scroll: publish a magnified crop of the
/// region under the cursor and mark that region on the full preview
/// with a reversible XOR rectangle.
///
/// The previous marker (if any) is XORed back out first, so the slot
/// pixels under the old rectangle are restored exactly before the new
/// one is drawn.
pub(crate) fn pointer_update(
    state: &mut PipelineState,
    event: PointerEvent,
    sink: &mut dyn PreviewSink,
) {
    let slot = state.latest_slot();
    let (ih, iw) = state.cache[slot].data.dim();
    if ih == 0 || iw == 0 {
        return;
    }

    if let Some(scroll) = event.scroll {
        state.lens.zoom = match scroll {
            Scroll::In => state.lens.zoom * 2.0,
            Scroll::Out => state.lens.zoom * 0.5,
        };
    }

    let (vw, vh) = state.lens.viewport;
    let window_w = ((vw as f32 / state.lens.zoom) as usize).max(1);
    let window_h = ((vh as f32 / state.lens.zoom) as usize).max(1);
    let roi = centered_rect(event.x, event.y, window_w, window_h, iw, ih);

    // Restore the pixels under the previous marker, keeping the mask
    // allocation when it still fits the slot.
    state.remove_lens_overlay(false);
    let mut mask = match state.lens.mask.take() {
        Some(m) if m.data.dim() == (ih, iw) => m,
        _ => Raster::zeros(ih, iw),
    };
    state.lens.slot = slot;

    sink.publish(PreviewImage::Lens, &state.cache[slot].cropped(&roi));

    let thickness = (iw / LENS_THICKNESS_DIVISOR).max(1);
    mask.draw_rect_outline(&roi, 255, thickness);
    state.cache[slot].xor_assign(&mask);
    state.lens.mask = Some(mask);

    sink.publish(PreviewImage::Output, &state.cache[slot]);
}
