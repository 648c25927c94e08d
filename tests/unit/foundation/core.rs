use super::*;

#[test]
fn surface_size_rejects_zero_dimensions() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    let s = SurfaceSize::new(320, 240).unwrap();
    assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 320.0, 240.0));
}

#[test]
fn argb_decodes_alpha_first() {
    let c = Rgba8::from_argb(0x6012_3456);
    assert_eq!(c, Rgba8::new(0x12, 0x34, 0x56, 0x60));
}

#[test]
fn scale_alpha_clamps_factor() {
    let c = Rgba8::new(10, 20, 30, 200);
    assert_eq!(c.scale_alpha(0.5).a, 100);
    assert_eq!(c.scale_alpha(2.0).a, 200);
    assert_eq!(c.scale_alpha(-1.0).a, 0);
}
