use tracing::debug;

use crate::error::Result;

use super::state::PipelineState;
use super::{stages, PreviewImage, PreviewSink, Stage};

/// Re-execute `target` and publish its output, first filling in any
/// prerequisite stage that has never run.
///
/// A stage-N parameter change invalidates every cached result from N
/// onward (later stages consumed N's old output) but never N-1's, so
/// the cache is truncated at `target` and only the suffix reruns. The
/// recursion is bounded by the stage count and bottoms out at stage 1;
/// slot 0, the source image, is always present. Requesting the final
/// stage on a fresh image therefore computes the whole pipeline in
/// order.
///
/// The lens overlay, if any, is reconciled out of the cache first: no
/// stage may read lens-marked pixels.
pub fn recompute(
    state: &mut PipelineState,
    target: Stage,
    sink: &mut dyn PreviewSink,
) -> Result<()> {
    state.remove_lens_overlay(true);

    if state.cache.len() < target.index() {
        if let Some(prev) = target.prev() {
            recompute(state, prev, sink)?;
        }
    }

    state.cache.truncate(target.index());
    let output = stages::run(target, &state.cache, &mut state.params)?;
    state.stage_runs[target.index()] += 1;
    debug!(
        stage = target.index(),
        height = output.height(),
        width = output.width(),
        "stage recomputed"
    );
    state.cache.push(output);

    sink.publish(PreviewImage::Output, &state.cache[target.index()]);
    Ok(())
}
