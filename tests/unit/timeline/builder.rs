use super::*;
use crate::{assets::decode::PreparedImage, timeline::spec::TransitionChoice};

fn slides(n: usize) -> Vec<Slide> {
    (0..n)
        .map(|i| Slide::new(format!("s{i}"), PreparedImage::solid(8, 6, [40, 80, 120, 255])))
        .collect()
}

fn fixed(kind: EffectKind, d: f64) -> TransitionSpec {
    TransitionSpec::fixed(kind, d)
}

#[test]
fn one_layer_per_slide_at_uniform_cadence() {
    for n in 1..6 {
        let tl = TimelineBuilder::new(2.5, TransitionSpec::parse("random", 1.0).unwrap())
            .seed(9)
            .build(slides(n))
            .unwrap();
        assert_eq!(tl.len(), n);
        assert_eq!(tl.junctions().len(), n - 1);
        for (i, layer) in tl.layers().iter().enumerate() {
            assert_eq!(layer.index(), i);
            assert_eq!(layer.start_time(), (i as f64) * 2.5);
            assert_eq!(layer.slide().source, format!("s{i}"));
        }
        assert_eq!(tl.total_duration(), (n as f64) * 2.5);
    }
}

#[test]
fn none_scenario_layers() {
    let tl = TimelineBuilder::new(5.0, fixed(EffectKind::None, 1.0))
        .build(slides(3))
        .unwrap();
    let starts: Vec<_> = tl.layers().iter().map(|l| l.start_time()).collect();
    let actives: Vec<_> = tl.layers().iter().map(|l| l.active_duration()).collect();
    assert_eq!(starts, vec![0.0, 5.0, 10.0]);
    assert_eq!(actives, vec![5.0, 5.0, 5.0]);
    assert_eq!(tl.total_duration(), 15.0);
}

#[test]
fn crossfade_scenario_layers() {
    let tl = TimelineBuilder::new(5.0, fixed(EffectKind::Crossfade, 1.0))
        .build(slides(3))
        .unwrap();
    let actives: Vec<_> = tl.layers().iter().map(|l| l.active_duration()).collect();
    assert_eq!(actives, vec![6.0, 6.0, 5.0]);
    assert_eq!(tl.layers()[0].entrance(), EffectKind::None);
    assert_eq!(tl.layers()[1].entrance(), EffectKind::Crossfade);
    assert_eq!(tl.layers()[2].exit(), EffectKind::None);
    assert!(tl.layers()[0].is_active_at(5.5));
    assert!(tl.layers()[1].is_active_at(5.5));
    assert!(!tl.layers()[0].is_active_at(6.0));
    assert_eq!(tl.total_duration(), 15.0);
}

#[test]
fn per_layer_kinds_do_not_extend_windows() {
    for kind in [EffectKind::ZoomIn, EffectKind::FadeInOut, EffectKind::None] {
        let tl = TimelineBuilder::new(4.0, fixed(kind, 1.0))
            .build(slides(3))
            .unwrap();
        assert!(tl.layers().iter().all(|l| l.active_duration() == 4.0));
    }
}

#[test]
fn per_layer_kinds_reach_the_first_layer() {
    let tl = TimelineBuilder::new(4.0, fixed(EffectKind::FadeInOut, 1.0))
        .build(slides(2))
        .unwrap();
    assert_eq!(tl.layers()[0].entrance(), EffectKind::FadeInOut);
    assert_eq!(tl.layers()[1].exit(), EffectKind::FadeInOut);

    let single = TimelineBuilder::new(4.0, fixed(EffectKind::ZoomIn, 1.0))
        .build(slides(1))
        .unwrap();
    assert_eq!(single.layers()[0].entrance(), EffectKind::ZoomIn);
    assert!(single.junctions().is_empty());
}

#[test]
fn overlap_follows_each_resolved_junction() {
    let tl = TimelineBuilder::new(3.0, TransitionSpec::parse("random", 0.5).unwrap())
        .seed(42)
        .build(slides(40))
        .unwrap();
    let n = tl.len();
    for (i, layer) in tl.layers().iter().enumerate() {
        let expected = if i + 1 < n && tl.junctions()[i].is_overlapping() {
            3.5
        } else {
            3.0
        };
        assert_eq!(layer.active_duration(), expected, "layer {i}");
        if i > 0 {
            assert_eq!(layer.entrance(), tl.junctions()[i - 1]);
        }
    }
}

#[test]
fn seeded_builds_are_reproducible() {
    let spec = TransitionSpec::new(TransitionChoice::Random, 0.5);
    let a = TimelineBuilder::new(2.0, spec.clone())
        .seed(7)
        .build(slides(20))
        .unwrap();
    let b = TimelineBuilder::new(2.0, spec)
        .seed(7)
        .build(slides(20))
        .unwrap();
    assert_eq!(a.junctions(), b.junctions());
    assert_eq!(a.seed(), 7);
}

#[test]
fn unseeded_builds_record_their_seed() {
    let spec = TransitionSpec::parse("crossfade,slide_up,zoom_in", 0.5).unwrap();
    let a = build(slides(12), 2.0, &spec).unwrap();
    let replay = TimelineBuilder::new(2.0, spec)
        .seed(a.seed())
        .build(slides(12))
        .unwrap();
    assert_eq!(a.junctions(), replay.junctions());
}

#[test]
fn configuration_errors() {
    let ok = fixed(EffectKind::Crossfade, 1.0);
    assert!(matches!(
        TimelineBuilder::new(5.0, ok.clone()).build(vec![]),
        Err(SlidecastError::Configuration(_))
    ));
    assert!(matches!(
        TimelineBuilder::new(0.0, fixed(EffectKind::None, 0.0)).build(slides(2)),
        Err(SlidecastError::Configuration(_))
    ));
    assert!(matches!(
        TimelineBuilder::new(-1.0, ok.clone()).build(slides(2)),
        Err(SlidecastError::Configuration(_))
    ));
    assert!(matches!(
        TimelineBuilder::new(5.0, fixed(EffectKind::Crossfade, 5.0)).build(slides(2)),
        Err(SlidecastError::Configuration(_))
    ));
    assert!(matches!(
        TimelineBuilder::new(5.0, fixed(EffectKind::Crossfade, -0.1)).build(slides(2)),
        Err(SlidecastError::Configuration(_))
    ));
    assert!(matches!(
        TimelineBuilder::new(f64::NAN, ok).build(slides(2)),
        Err(SlidecastError::Configuration(_))
    ));
}

#[test]
fn canvas_comes_from_the_first_slide() {
    let mut s = slides(1);
    s.push(Slide::new("big", PreparedImage::solid(20, 20, [0, 0, 0, 255])));
    let tl = TimelineBuilder::new(1.0, fixed(EffectKind::None, 0.0))
        .build(s)
        .unwrap();
    assert_eq!(tl.canvas(), Canvas { width: 8, height: 6 });
}
