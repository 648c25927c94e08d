use super::*;

#[test]
fn paint_set_assigns_one_blend_per_role() {
    let bg = Rgba8::from_argb(0x6000_0000);
    let set = PaintSet::new(bg);
    assert_eq!(set.background, Paint::new(bg, PaintBlend::SourceOver));
    assert_eq!(set.shape.blend, PaintBlend::Clear);
    assert_eq!(set.effect.blend, PaintBlend::Plus);
}

#[test]
fn with_color_keeps_blend() {
    let p = Paint::new(Rgba8::WHITE, PaintBlend::Plus).with_color(Rgba8::new(1, 2, 3, 4));
    assert_eq!(p.blend, PaintBlend::Plus);
    assert_eq!(p.color, Rgba8::new(1, 2, 3, 4));
}
