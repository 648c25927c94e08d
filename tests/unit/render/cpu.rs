use std::{rc::Rc, time::Duration};

use super::*;
use crate::{
    animation::ease::Ease,
    config::SurfaceConfig,
    draw::{effect::FlickerEffect, shape::Circle},
    surface::{host::HeadlessHost, target::Target},
};

fn size() -> SurfaceSize {
    SurfaceSize::new(64, 64).unwrap()
}

fn visible_surface() -> OverlaySurface<HeadlessHost> {
    let mut s = OverlaySurface::new(HeadlessHost::new(size()), SurfaceConfig::default());
    s.start_engine(Duration::from_millis(10), Ease::Linear, || {});
    s.on_frame(Duration::from_millis(20));
    s
}

fn hole_target() -> Rc<Target> {
    Rc::new(
        Target::builder()
            .anchor_xy(32.0, 32.0)
            .shape(Circle::new(12.0).with_timing(Duration::from_millis(100), Ease::Linear))
            .build(),
    )
}

fn close(a: u8, b: u8) -> bool {
    a.abs_diff(b) <= 1
}

#[test]
fn background_only_frame_is_uniform_dim() {
    let s = visible_surface();
    let frame = render_frame(&s).unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    for [x, y] in [[0, 0], [32, 32], [63, 63]] {
        let [r, g, b, a] = frame.pixel(x, y).unwrap();
        assert_eq!([r, g, b], [0, 0, 0]);
        assert!(close(a, 0x60), "alpha {a} at {x},{y}");
    }
}

#[test]
fn cut_out_clears_only_covered_pixels() {
    let mut s = visible_surface();
    s.start_target(hole_target(), None);
    s.on_frame(Duration::from_millis(200));

    let frame = render_frame(&s).unwrap();
    assert_eq!(frame.pixel(32, 32).unwrap()[3], 0);
    assert_eq!(frame.pixel(36, 30).unwrap()[3], 0);
    assert!(close(frame.pixel(0, 0).unwrap()[3], 0x60));
    assert!(close(frame.pixel(60, 32).unwrap()[3], 0x60));
}

#[test]
fn effect_adds_light_around_the_cut_out() {
    let mut s = visible_surface();
    let target = Target::builder()
        .anchor_xy(32.0, 32.0)
        .shape(Circle::new(8.0).with_timing(Duration::from_millis(100), Ease::Linear))
        .effect(
            FlickerEffect::new(24.0, crate::foundation::core::Rgba8::WHITE)
                .with_timing(Duration::from_millis(1000), Ease::Linear),
        )
        .build();
    s.start_target(Rc::new(target), None);
    s.on_frame(Duration::from_millis(500));

    let frame = render_frame(&s).unwrap();
    let [r, _, _, a] = frame.pixel(48, 32).unwrap();
    assert!(r > 100, "red {r}");
    assert!(a > 0x60, "alpha {a}");
    assert_eq!(frame.pixel(32, 32).unwrap()[3], 0);
    assert!(close(frame.pixel(2, 2).unwrap()[3], 0x60));
}

#[test]
fn surface_alpha_scales_the_whole_frame() {
    let mut s = OverlaySurface::new(HeadlessHost::new(size()), SurfaceConfig::default());
    s.start_engine(Duration::from_millis(100), Ease::Linear, || {});
    s.on_frame(Duration::from_millis(50));
    assert!((s.alpha() - 0.5).abs() < 1e-9);

    let frame = render_frame(&s).unwrap();
    let a = frame.pixel(10, 10).unwrap()[3];
    assert!(a.abs_diff(0x30) <= 2, "alpha {a}");
}

#[test]
fn idle_surface_renders_transparent() {
    let s = OverlaySurface::new(HeadlessHost::new(size()), SurfaceConfig::default());
    let frame = render_frame(&s).unwrap();
    assert!(frame.data.iter().all(|b| *b == 0));
}

#[test]
fn renderer_is_reusable_across_frames() {
    let mut s = visible_surface();
    let mut renderer = CpuRenderer::new(size()).unwrap();
    let before = renderer.render(&s).unwrap();

    s.start_target(hole_target(), None);
    s.on_frame(Duration::from_millis(200));
    let after = renderer.render(&s).unwrap();

    assert!(close(before.pixel(32, 32).unwrap()[3], 0x60));
    assert_eq!(after.pixel(32, 32).unwrap()[3], 0);
}

#[test]
fn oversized_and_mismatched_surfaces_are_rejected() {
    let err = CpuRenderer::new(SurfaceSize::new(70_000, 10).unwrap())
        .err()
        .unwrap();
    assert!(matches!(err, SpotlightError::Render(_)));

    let s = visible_surface();
    let mut renderer = CpuRenderer::new(SurfaceSize::new(32, 32).unwrap()).unwrap();
    let err = renderer.render(&s).unwrap_err();
    assert!(matches!(err, SpotlightError::Render(_)));
}

#[test]
fn blend_modes_map_to_layers() {
    assert!(blend_to_cpu(PaintBlend::SourceOver).is_none());
    assert_eq!(
        blend_to_cpu(PaintBlend::Clear),
        Some(BlendMode::new(Mix::Normal, Compose::DestOut))
    );
    assert_eq!(
        blend_to_cpu(PaintBlend::Plus),
        Some(BlendMode::new(Mix::Normal, Compose::Plus))
    );
}
