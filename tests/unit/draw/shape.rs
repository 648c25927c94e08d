use super::*;
use crate::{
    draw::canvas::{DrawKind, RecordingCanvas},
    foundation::core::{Rgba8, SurfaceSize},
    paint::PaintBlend,
};

fn canvas() -> RecordingCanvas {
    RecordingCanvas::new(SurfaceSize::new(200, 200).unwrap())
}

fn mask() -> Paint {
    Paint::new(Rgba8::WHITE, PaintBlend::Clear)
}

#[test]
fn circle_radius_scales_with_progress() {
    let mut c = canvas();
    Circle::new(40.0).draw(&mut c, Point::new(100.0, 100.0), 0.5, &mask());
    let call = c.calls()[0];
    assert_eq!(call.kind, DrawKind::Path);
    assert_eq!(call.blend, PaintBlend::Clear);
    assert!((call.bounds.width() - 40.0).abs() < 0.5);
    assert!((call.bounds.center().x - 100.0).abs() < 1e-6);
}

#[test]
fn closed_shapes_draw_nothing() {
    let mut c = canvas();
    Circle::new(40.0).draw(&mut c, Point::new(10.0, 10.0), 0.0, &mask());
    RoundedRectangle::new(80.0, 40.0, 8.0).draw(&mut c, Point::new(10.0, 10.0), 0.0, &mask());
    assert!(c.calls().is_empty());
}

#[test]
fn rounded_rectangle_is_centred_on_anchor() {
    let mut c = canvas();
    RoundedRectangle::new(80.0, 40.0, 8.0).draw(&mut c, Point::new(100.0, 50.0), 1.0, &mask());
    let b = c.calls()[0].bounds;
    assert!((b.x0 - 60.0).abs() < 1e-6);
    assert!((b.x1 - 140.0).abs() < 1e-6);
    assert!((b.y0 - 30.0).abs() < 1e-6);
    assert!((b.y1 - 70.0).abs() < 1e-6);
}

#[test]
fn default_timing_is_half_second_decelerate() {
    let circle = Circle::new(10.0);
    assert_eq!(Shape::duration(&circle), Duration::from_millis(500));
    assert_eq!(Shape::ease(&circle), Ease::OutQuart);
    let custom = RoundedRectangle::new(1.0, 1.0, 0.0)
        .with_timing(Duration::from_millis(120), Ease::Linear);
    assert_eq!(Shape::duration(&custom), Duration::from_millis(120));
}
