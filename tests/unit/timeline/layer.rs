use super::*;
use crate::{
    assets::decode::PreparedImage,
    effects::library::ZOOM_END_SCALE,
    foundation::core::Vec2,
    timeline::{
        builder::TimelineBuilder,
        spec::{TransitionChoice, TransitionSpec},
    },
};

fn canvas() -> Canvas {
    Canvas::new(8, 6).unwrap()
}

fn layer(entrance: EffectKind, exit: EffectKind) -> Layer {
    Layer::new(
        1,
        Slide::new("s", PreparedImage::solid(8, 6, [0, 0, 0, 255])),
        2.0,
        2.0,
        4.0,
        0.5,
        entrance,
        exit,
    )
}

#[test]
fn window_is_half_open() {
    let l = layer(EffectKind::None, EffectKind::None);
    assert!(!l.is_active_at(1.999));
    assert!(l.is_active_at(2.0));
    assert!(l.is_active_at(3.999));
    assert!(!l.is_active_at(4.0));
}

#[test]
fn zoom_exit_scales_after_a_crossfade_entrance() {
    let l = layer(EffectKind::Crossfade, EffectKind::ZoomIn);
    let early = l.transform_at(0.25, canvas());
    assert!((early.opacity - 0.5).abs() < 1e-9);
    assert!(early.scale > 1.0 && early.scale < 1.02);

    let late = l.transform_at(1.9, canvas());
    assert_eq!(late.opacity, 1.0);
    assert!((late.scale - (1.0 + (ZOOM_END_SCALE - 1.0) * 0.95)).abs() < 1e-9);
}

#[test]
fn zoom_entrance_and_exit_do_not_compound() {
    let l = layer(EffectKind::ZoomIn, EffectKind::ZoomIn);
    let t = l.transform_at(1.0, canvas());
    assert!((t.scale - (1.0 + ZOOM_END_SCALE) / 2.0).abs() < 1e-9);
}

#[test]
fn fade_exit_dims_the_tail() {
    let l = layer(EffectKind::SlideLeft, EffectKind::FadeInOut);
    let t = l.transform_at(1.75, canvas());
    assert!((t.opacity - 0.5).abs() < 1e-9);
    assert_eq!(t.offset, Vec2::ZERO);
    assert_eq!(t.scale, 1.0);
}

#[test]
fn built_timeline_zooms_the_layer_before_a_zoom_junction() {
    let spec = TransitionSpec::new(
        TransitionChoice::OneOf(vec![EffectKind::Crossfade, EffectKind::ZoomIn]),
        0.5,
    );
    let tl = (0..64)
        .map(|seed| {
            TimelineBuilder::new(2.0, spec.clone())
                .seed(seed)
                .build(vec![
                    Slide::new("a", PreparedImage::solid(8, 6, [255, 0, 0, 255])),
                    Slide::new("b", PreparedImage::solid(8, 6, [0, 255, 0, 255])),
                    Slide::new("c", PreparedImage::solid(8, 6, [0, 0, 255, 255])),
                ])
                .unwrap()
        })
        .find(|tl| tl.junctions() == [EffectKind::Crossfade, EffectKind::ZoomIn])
        .unwrap();

    let middle = &tl.layers()[1];
    assert_eq!(middle.entrance(), EffectKind::Crossfade);
    assert_eq!(middle.exit(), EffectKind::ZoomIn);
    assert!(middle.transform_at(1.9, tl.canvas()).scale > 1.0);
}
