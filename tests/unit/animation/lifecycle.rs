use super::*;
use crate::{
    foundation::core::{Point, Rgba8Premul},
    grid::dot::{DotId, Generation},
};
use rand::{SeedableRng, rngs::StdRng};

fn dot() -> Dot {
    Dot::new(
        DotId(0),
        Generation(1),
        Point::new(100.0, 200.0),
        10.0,
        Rgba8Premul::opaque(9, 9, 9),
    )
}

#[test]
fn full_walk_is_enter_three_jumps_fade_remove() {
    let cfg = AnimationConfig::default();
    let mut rng = StdRng::seed_from_u64(11);
    let mut d = dot();
    let mut kinds = Vec::new();

    loop {
        match advance(&mut d, &cfg, &mut rng) {
            Step::Schedule(spec) => kinds.push(spec.kind),
            Step::Remove => break,
            Step::Idle => panic!("idle before removal"),
        }
        assert!(d.action_count <= 3);
    }

    assert_eq!(
        kinds,
        vec![
            TweenKind::Jump,
            TweenKind::Jump,
            TweenKind::Jump,
            TweenKind::Fade
        ]
    );
    assert_eq!(d.action_count, 3);
    assert_eq!(d.phase, DotPhase::Removed);
    assert_eq!(advance(&mut d, &cfg, &mut rng), Step::Idle);
    assert_eq!(d.action_count, 3);
}

#[test]
fn action_count_increments_only_on_jump_completion() {
    let cfg = AnimationConfig::default();
    let mut rng = StdRng::seed_from_u64(2);
    let mut d = dot();

    advance(&mut d, &cfg, &mut rng);
    assert_eq!((d.phase, d.action_count), (DotPhase::Walking, 0));
    advance(&mut d, &cfg, &mut rng);
    assert_eq!((d.phase, d.action_count), (DotPhase::Walking, 1));
    advance(&mut d, &cfg, &mut rng);
    assert_eq!((d.phase, d.action_count), (DotPhase::Walking, 2));
    advance(&mut d, &cfg, &mut rng);
    assert_eq!((d.phase, d.action_count), (DotPhase::FadingOut, 3));
}

#[test]
fn jumps_stay_within_configured_ranges() {
    let cfg = AnimationConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let d = dot();
    let mut saw_h = false;
    let mut saw_v = false;

    for _ in 0..500 {
        let spec = jump(&d, &cfg, &mut rng);
        assert!((0.0..=2.0).contains(&spec.delay));
        assert!((1.0..=4.0).contains(&spec.duration));
        let TweenTo::Jump { x, y, size } = spec.to else {
            panic!("jump spec must target a jump");
        };
        assert!((10.0..=20.0).contains(&size));
        match (x, y) {
            (Some(x), None) => {
                saw_h = true;
                assert!((x - 100.0).abs() <= 100.0);
            }
            (None, Some(y)) => {
                saw_v = true;
                assert!((y - 200.0).abs() <= 100.0);
            }
            other => panic!("jump must move exactly one axis, got {other:?}"),
        }
    }
    assert!(saw_h && saw_v);
}

#[test]
fn enter_and_fade_use_fixed_durations() {
    let cfg = AnimationConfig::default();
    let e = enter(&cfg);
    assert_eq!((e.kind, e.delay, e.duration), (TweenKind::Enter, 0.0, 2.0));
    assert_eq!(e.to, TweenTo::Scale(1.0));
    let f = fade(&cfg);
    assert_eq!((f.kind, f.delay, f.duration), (TweenKind::Fade, 0.0, 1.0));
    assert_eq!(f.to, TweenTo::Opacity(0.0));
}

#[test]
fn zero_jumps_goes_straight_to_fade() {
    let cfg = AnimationConfig {
        jumps_per_dot: 0,
        ..AnimationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);
    let mut d = dot();
    let Step::Schedule(spec) = advance(&mut d, &cfg, &mut rng) else {
        panic!("expected a fade");
    };
    assert_eq!(spec.kind, TweenKind::Fade);
    assert_eq!(d.phase, DotPhase::FadingOut);
}
