use descan_core::geometry::bounding_box;
use descan_core::params::Params;
use descan_core::pipeline::{NullSink, Session};
use descan_core::raster::Raster;

/// Full default-shaped run over a synthetic scan: a 100x200 portrait
/// page, white background, dark rectangle in the middle. The final
/// slot must be pure black and white, cropped close to the rectangle.
#[test]
fn test_synthetic_page_normalizes_to_cropped_black_block() {
    // Page 200 rows x 100 cols; dark block rows 80..120, cols 30..70.
    let mut source = Raster::from_elem(200, 100, 255);
    for y in 80..120 {
        for x in 30..70 {
            source.data[[y, x]] = 50;
        }
    }

    let params = Params {
        target_size: 400,
        kernel_size: 3,
        bilateral_diameter: 5,
        bilateral_sigma_color: 30.0,
        ..Params::default()
    };
    let session = Session::new(source, params).unwrap();
    session.run_all(&mut NullSink).unwrap();
    let out = session.finish(&mut NullSink).unwrap();

    // Strictly bilevel output.
    assert!(out.data.iter().all(|&p| p == 0 || p == 255));

    // Stage 2 crops to the 40x40 block plus a 10 pixel margin (60x60),
    // stage 3 scales that square up to roughly 440, and stage 6 crops
    // back to the black content. The surviving block is therefore
    // about 40/60 of 440 pixels on each side.
    let expected = 40.0 / 60.0 * 440.0;
    let tolerance = 12.0;
    assert!(
        (out.width() as f64 - expected).abs() < tolerance,
        "width {} not within {} of {}",
        out.width(),
        tolerance,
        expected
    );
    assert!(
        (out.height() as f64 - expected).abs() < tolerance,
        "height {} not within {} of {}",
        out.height(),
        tolerance,
        expected
    );

    // The black content fills the cropped result edge to edge.
    let content = bounding_box(&out, 0, 0, 0);
    assert!(!content.is_empty());
    assert!(content.x <= 1 && content.y <= 1);
    assert!(content.x + content.width >= out.width() - 1);
    assert!(content.y + content.height >= out.height() - 1);

    // Overwhelmingly black: the page background was cropped away.
    let black = out.data.iter().filter(|&&p| p == 0).count();
    assert!(black as f64 > 0.9 * out.data.len() as f64);
}

/// Dragging several knobs and re-running must always converge to a
/// valid final result, whatever the warm/cold state of the cache.
#[test]
fn test_knob_twiddling_converges() {
    use descan_core::params::Control;

    let mut source = Raster::from_elem(120, 80, 255);
    for y in 40..70 {
        for x in 20..60 {
            source.data[[y, x]] = 30;
        }
    }
    let params = Params {
        target_size: 150,
        kernel_size: 3,
        bilateral_diameter: 3,
        ..Params::default()
    };
    let session = Session::new(source, params).unwrap();

    let controls = [
        Control::BinaryThreshold(90),
        Control::ContrastAlpha(500),
        Control::Border(4),
        Control::TargetSize(120),
        Control::KernelSize(5),
        Control::ThresholdWhite(230),
    ];
    for control in controls {
        assert!(session.on_control(control, &mut NullSink).unwrap());
    }

    let out = session.finish(&mut NullSink).unwrap();
    assert!(!out.is_empty());
    assert!(out.data.iter().all(|&p| p == 0 || p == 255));
    assert_eq!(session.cached_slots(), 8);
}
