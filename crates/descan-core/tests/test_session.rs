use std::sync::{Arc, Barrier};
use std::thread;

use descan_core::consts::DEFAULT_BINARY_THRESHOLD;
use descan_core::params::{Control, Params};
use descan_core::pipeline::{NullSink, PointerEvent, PreviewImage, PreviewSink, Session, Stage};
use descan_core::raster::Raster;

/// Sink that parks inside `publish` so the test can observe a
/// recompute while it is still in flight (the state lock is held until
/// the engine returns).
struct BlockingSink {
    enter: Arc<Barrier>,
    exit: Arc<Barrier>,
}

impl PreviewSink for BlockingSink {
    fn publish(&mut self, _which: PreviewImage, _image: &Raster) {
        self.enter.wait();
        self.exit.wait();
    }
}

fn small_params() -> Params {
    Params {
        target_size: 50,
        kernel_size: 3,
        bilateral_diameter: 3,
        ..Params::default()
    }
}

#[test]
fn test_events_during_a_recompute_are_dropped() {
    let source = Raster::from_elem(40, 30, 200);
    let session = Arc::new(Session::new(source, small_params()).unwrap());

    let enter = Arc::new(Barrier::new(2));
    let exit = Arc::new(Barrier::new(2));

    let worker = {
        let session = Arc::clone(&session);
        let mut sink = BlockingSink {
            enter: Arc::clone(&enter),
            exit: Arc::clone(&exit),
        };
        thread::spawn(move || session.trigger(Stage::Denoise, &mut sink).unwrap())
    };

    // Stage 1 has executed and its publish is parked; the lock is held.
    enter.wait();

    assert!(
        !session
            .on_control(Control::BinaryThreshold(100), &mut NullSink)
            .unwrap(),
        "control event must be dropped, not queued"
    );
    assert!(!session.reset());
    assert!(!session.on_pointer(
        PointerEvent {
            x: 5,
            y: 5,
            scroll: None
        },
        &mut NullSink,
    ));

    exit.wait();
    assert!(worker.join().unwrap());

    // The dropped events left no trace: no partial writes, no
    // parameter change, no extra stage executions.
    assert_eq!(session.cached_slots(), 2);
    let runs = session.stage_runs();
    assert_eq!(runs[1], 1);
    assert_eq!(&runs[2..8], &[0; 6]);
    assert_eq!(session.params().binary_threshold, DEFAULT_BINARY_THRESHOLD);
}

#[test]
fn test_sessions_do_not_contend_with_each_other() {
    // The guard is per session, not process wide: a recompute held in
    // one session must not block another.
    let a = Arc::new(Session::new(Raster::from_elem(40, 30, 200), small_params()).unwrap());
    let b = Session::new(Raster::from_elem(40, 30, 200), small_params()).unwrap();

    let enter = Arc::new(Barrier::new(2));
    let exit = Arc::new(Barrier::new(2));

    let worker = {
        let a = Arc::clone(&a);
        let mut sink = BlockingSink {
            enter: Arc::clone(&enter),
            exit: Arc::clone(&exit),
        };
        thread::spawn(move || a.trigger(Stage::Denoise, &mut sink).unwrap())
    };

    enter.wait();
    assert!(b.trigger(Stage::Denoise, &mut NullSink).unwrap());
    exit.wait();
    assert!(worker.join().unwrap());
}

/// Sink that records which previews were published.
#[derive(Default)]
struct RecordingSink {
    published: Vec<(PreviewImage, usize, usize)>,
}

impl PreviewSink for RecordingSink {
    fn publish(&mut self, which: PreviewImage, image: &Raster) {
        self.published.push((which, image.height(), image.width()));
    }
}

#[test]
fn test_pointer_publishes_lens_and_marked_output() {
    let source = Raster::from_elem(40, 30, 200);
    let session = Session::new(source, small_params()).unwrap();
    session.set_lens_viewport(16, 16);

    let mut sink = RecordingSink::default();
    assert!(session.on_pointer(
        PointerEvent {
            x: 15,
            y: 20,
            scroll: None,
        },
        &mut sink,
    ));

    assert_eq!(sink.published.len(), 2);
    assert_eq!(sink.published[0], (PreviewImage::Lens, 16, 16));
    assert_eq!(sink.published[1], (PreviewImage::Output, 40, 30));
}

#[test]
fn test_run_all_publishes_each_stage_in_order() {
    let source = Raster::from_elem(40, 30, 200);
    let session = Session::new(source, small_params()).unwrap();

    let mut sink = RecordingSink::default();
    session.run_all(&mut sink).unwrap();

    assert_eq!(sink.published.len(), 7);
    assert!(sink
        .published
        .iter()
        .all(|(which, _, _)| *which == PreviewImage::Output));
}
