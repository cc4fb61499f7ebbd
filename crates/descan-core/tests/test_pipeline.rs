use descan_core::params::{Control, Params};
use descan_core::pipeline::{NullSink, Session, Stage};
use descan_core::raster::Raster;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// White page with a dark rectangular block.
fn page_with_block(
    h: usize,
    w: usize,
    top: usize,
    left: usize,
    bh: usize,
    bw: usize,
    value: u8,
) -> Raster {
    let mut img = Raster::from_elem(h, w, 255);
    for y in top..top + bh {
        for x in left..left + bw {
            img.data[[y, x]] = value;
        }
    }
    img
}

/// Parameters scaled down so tests stay fast: small target size, tiny
/// blur kernel, tight bilateral neighborhood.
fn test_params() -> Params {
    Params {
        target_size: 100,
        kernel_size: 3,
        bilateral_diameter: 3,
        bilateral_sigma_color: 30.0,
        border: 5,
        ..Params::default()
    }
}

// ---------------------------------------------------------------------------
// Recompute engine
// ---------------------------------------------------------------------------

#[test]
fn test_cold_run_computes_each_stage_once() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();

    assert!(session.run_all(&mut NullSink).unwrap());

    assert_eq!(session.cached_slots(), 8);
    let runs = session.stage_runs();
    for stage in Stage::ALL {
        assert_eq!(runs[stage.index()], 1, "stage {} ran once", stage.index());
    }
}

#[test]
fn test_parameter_change_reruns_only_the_suffix() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();
    session.run_all(&mut NullSink).unwrap();

    // Stage-5 knob: stages 1..4 must keep their cached results.
    assert!(session
        .on_control(Control::ContrastBeta(50), &mut NullSink)
        .unwrap());

    let runs = session.stage_runs();
    assert_eq!(&runs[1..5], &[1, 1, 1, 1]);
    assert_eq!(&runs[5..8], &[2, 2, 2]);
    assert_eq!(session.cached_slots(), 8);
    assert_eq!(session.params().contrast_beta, 50);
}

#[test]
fn test_triggering_an_earlier_stage_truncates_the_cache() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();
    session.run_all(&mut NullSink).unwrap();

    assert!(session.trigger(Stage::Rescale, &mut NullSink).unwrap());
    assert_eq!(session.cached_slots(), 4, "slots beyond the target are stale");

    let runs = session.stage_runs();
    assert_eq!(&runs[1..4], &[1, 1, 2]);
    assert_eq!(&runs[4..8], &[1, 1, 1, 1]);

    // Running the rest again only fills the missing suffix.
    session.run_all(&mut NullSink).unwrap();
    let runs = session.stage_runs();
    assert_eq!(&runs[1..8], &[1, 1, 2, 2, 2, 2, 2]);
    assert_eq!(session.cached_slots(), 8);
}

#[test]
fn test_trigger_mid_stage_on_cold_cache_fills_prerequisites() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();

    assert!(session.trigger(Stage::Blur, &mut NullSink).unwrap());
    assert_eq!(session.cached_slots(), 5);
    let runs = session.stage_runs();
    assert_eq!(&runs[1..5], &[1, 1, 1, 1]);
    assert_eq!(&runs[5..8], &[0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Stage 2 / stage 6 crop semantics
// ---------------------------------------------------------------------------

#[test]
fn test_stage2_padded_bounding_box() {
    // 50x30 page, dark block rows 20..30 x cols 10..20, border 5.
    //
    // Stage 2 pads to 60x40 (block shifts to 25..35 x 15..25), finds
    // the content box over the padded image (the 255 ring is outside
    // the [0, 240] range so it never widens the box), then re-expands
    // by the border: rows 20..40 x cols 10..30 -> a 20x20 crop with a
    // 5 pixel margin all around the block.
    let source = page_with_block(50, 30, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();

    session.trigger(Stage::BorderCrop, &mut NullSink).unwrap();
    let out = session.latest_preview();
    assert_eq!((out.height(), out.width()), (20, 20));
    // Margin is background, center is content.
    assert_eq!(out.data[[0, 0]], 255);
    assert!(out.data[[10, 10]] < 150);
}

#[test]
fn test_stage2_blank_page_pads_without_cropping() {
    let source = Raster::from_elem(50, 30, 255);
    let session = Session::new(source, test_params()).unwrap();

    session.trigger(Stage::BorderCrop, &mut NullSink).unwrap();
    let out = session.latest_preview();
    // No qualifying pixel: the padded image passes through uncropped.
    assert_eq!((out.height(), out.width()), (60, 40));
}

#[test]
fn test_blank_page_runs_to_all_white() {
    // A page with no content must survive the whole pipeline (stage 6
    // passes through instead of cropping) and binarize to pure white.
    let source = Raster::from_elem(50, 30, 255);
    let session = Session::new(source, test_params()).unwrap();

    session.run_all(&mut NullSink).unwrap();
    let out = session.latest_preview();
    assert!(!out.is_empty());
    assert!(out.data.iter().all(|&p| p == 255));
}

// ---------------------------------------------------------------------------
// Derived parameters
// ---------------------------------------------------------------------------

#[test]
fn test_target_size_clamped_and_rate_derived() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let mut params = test_params();
    params.target_size = 1; // below the configured minimum
    let session = Session::new(source, params).unwrap();

    session.trigger(Stage::Rescale, &mut NullSink).unwrap();
    let params = session.params();
    assert_eq!(params.target_size, descan_core::consts::MIN_TARGET_SIZE);
    // rate = target / source long edge = 10 / 60
    assert!((params.resizing_rate - 10.0 / 60.0).abs() < 1e-12);
}

#[test]
fn test_even_kernel_size_is_forced_odd() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let mut params = test_params();
    params.kernel_size = 4;
    let session = Session::new(source, params).unwrap();

    session.trigger(Stage::Blur, &mut NullSink).unwrap();
    assert_eq!(session.params().kernel_size, 5);
}

// ---------------------------------------------------------------------------
// Lens overlay vs. engine
// ---------------------------------------------------------------------------

#[test]
fn test_recompute_strips_the_lens_overlay_first() {
    use descan_core::pipeline::PointerEvent;

    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();
    session.run_all(&mut NullSink).unwrap();
    let clean = session.latest_preview();

    // Mark the final slot with the lens.
    assert!(session.on_pointer(
        PointerEvent {
            x: 10,
            y: 10,
            scroll: None
        },
        &mut NullSink,
    ));
    assert_ne!(session.latest_preview(), clean);

    // Recomputing the final stage reconciles the marker before the
    // stage reads the cache; output is bit-identical to the clean run.
    session.trigger(Stage::Binarize, &mut NullSink).unwrap();
    assert_eq!(session.latest_preview(), clean);
}

#[test]
fn test_finish_returns_reconciled_result() {
    use descan_core::pipeline::PointerEvent;

    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();
    session.run_all(&mut NullSink).unwrap();
    let clean = session.latest_preview();

    session.on_pointer(
        PointerEvent {
            x: 20,
            y: 20,
            scroll: None,
        },
        &mut NullSink,
    );

    let finished = session.finish(&mut NullSink).unwrap();
    assert_eq!(finished, clean);
}

#[test]
fn test_finish_on_cold_session_runs_the_pipeline() {
    let source = page_with_block(60, 40, 20, 10, 10, 10, 100);
    let session = Session::new(source, test_params()).unwrap();

    let finished = session.finish(&mut NullSink).unwrap();
    assert!(!finished.is_empty());
    assert!(finished.data.iter().all(|&p| p == 0 || p == 255));
    assert_eq!(session.cached_slots(), 8);
}

#[test]
fn test_empty_source_is_rejected() {
    assert!(Session::new(Raster::zeros(0, 0), Params::default()).is_err());
}
