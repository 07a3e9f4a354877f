use super::*;
use crate::{
    animation::tween::TweenKind,
    grid::{
        dot::{DotId, DotKey, DotPhase},
        layout::GridLayout,
    },
};

fn small_cfg() -> AnimationConfig {
    AnimationConfig {
        layout: GridLayout {
            rows: 2,
            cols: 2,
            cell_size: 10.0,
        },
        ..AnimationConfig::default()
    }
}

fn controller(seed: u64) -> Controller {
    Controller::new(
        small_cfg(),
        Canvas::new(100, 100).unwrap(),
        PaletteName::Schema1,
        seed,
    )
    .unwrap()
}

#[test]
fn new_schedules_one_entrance_per_dot() {
    let c = controller(1);
    assert_eq!(c.session().len(), 4);
    assert_eq!(c.session().generation(), Generation(1));
    assert_eq!(c.timeline().len(), 4);
    for d in c.session().dots() {
        assert_eq!(c.timeline().pending_for(d.key()), 1);
    }
}

#[test]
fn entering_completes_before_first_jump() {
    let mut c = controller(2);
    let report = c.tick(1.9);
    assert_eq!(report.completed, 0);
    assert!(c.session().dots().iter().all(|d| d.phase == DotPhase::Entering));

    let report = c.tick(0.2);
    assert_eq!(report.completed, 4);
    for d in c.session().dots() {
        assert_eq!(d.scale, 1.0);
        assert_eq!(d.phase, DotPhase::Walking);
        assert_eq!(d.action_count, 0);
        assert_eq!(c.timeline().pending_for(d.key()), 1);
    }
}

#[test]
fn every_dot_is_removed_after_its_lifetime() {
    let mut c = controller(3);
    let mut removed = 0;
    let mut last_len = c.session().len();
    // 1/60 s steps for the maximum lifetime plus slack.
    for _ in 0..(60 * 23) {
        let r = c.tick(1.0 / 60.0);
        removed += r.removed;
        assert!(c.session().len() <= last_len);
        last_len = c.session().len();
        for d in c.session().dots() {
            assert!(d.action_count <= 3);
            assert!(c.timeline().pending_for(d.key()) <= 1);
        }
    }
    assert_eq!(removed, 4);
    assert!(c.is_idle());
    assert_eq!(c.session().removed(), 4);
}

#[test]
fn restart_discards_tweens_and_rebuilds() {
    let mut c = controller(4);
    c.tick(3.0);
    c.restart().unwrap();

    assert_eq!(c.session().generation(), Generation(2));
    assert_eq!(c.session().len(), 4);
    assert_eq!(c.timeline().len(), 4);
    assert_eq!(c.restarts(), 1);
    for d in c.session().dots() {
        assert_eq!(d.phase, DotPhase::Entering);
        assert_eq!(d.scale, 0.0);
        assert_eq!(d.action_count, 0);
    }
}

#[test]
fn repeated_restart_leaves_exactly_one_fresh_grid() {
    let mut c = controller(5);
    c.tick(2.5);
    for _ in 0..10 {
        c.restart().unwrap();
    }
    assert_eq!(c.session().generation(), Generation(11));
    assert_eq!(c.session().len(), 4);
    assert_eq!(c.timeline().len(), 4);
    assert!(c.session().dots().iter().all(|d| d.phase == DotPhase::Entering));

    let mut stale = 0;
    for _ in 0..100 {
        stale += c.tick(0.25).stale;
    }
    assert_eq!(stale, 0);
}

#[test]
fn stale_completion_is_a_silent_no_op() {
    let mut c = controller(6);
    c.restart().unwrap();
    let before: Vec<_> = c.session().dots().to_vec();

    let mut report = TickReport::default();
    let old = Completion {
        key: DotKey {
            id: DotId(0),
            generation: Generation(1),
        },
        kind: TweenKind::Fade,
    };
    c.dispatch(old, &mut report);
    c.dispatch(old, &mut report);

    assert_eq!(report.stale, 2);
    assert_eq!(report.removed, 0);
    assert_eq!(c.session().dots(), before.as_slice());
    assert_eq!(c.timeline().len(), 4);
}

#[test]
fn completion_for_removed_dot_does_not_resurrect_it() {
    let mut c = controller(7);
    let key = c.session().dots()[0].key();
    c.session.remove(key);

    let mut report = TickReport::default();
    c.dispatch(
        Completion {
            key,
            kind: TweenKind::Jump,
        },
        &mut report,
    );
    assert_eq!(report.stale, 1);
    assert!(!c.session().contains(key));
    assert_eq!(c.session().len(), 3);
}

#[test]
fn palette_selection_recolors_only_the_new_grid() {
    let mut c = controller(8);
    c.apply(ControlEvent::SelectPalette(PaletteName::Schema3))
        .unwrap();
    assert_eq!(c.palette(), PaletteName::Schema3);
    let schema3 = Palette::get(PaletteName::Schema3);
    assert_eq!(c.session().palette().name(), PaletteName::Schema3);
    assert!(c.session().dots().iter().all(|d| schema3.contains(d.color)));
    assert_eq!(c.session().generation(), Generation(2));

    c.apply(ControlEvent::Restart).unwrap();
    assert!(c.session().dots().iter().all(|d| schema3.contains(d.color)));
}

#[test]
fn same_seed_gives_identical_runs() {
    let mut a = controller(99);
    let mut b = controller(99);
    for _ in 0..200 {
        a.tick(0.05);
        b.tick(0.05);
    }
    assert_eq!(a.session().dots(), b.session().dots());
}

#[test]
fn control_events_use_snake_case_json() {
    let ev: ControlEvent = serde_json::from_str(r#"{"select_palette":"Schema 2"}"#).unwrap();
    assert_eq!(ev, ControlEvent::SelectPalette(PaletteName::Schema2));
    let ev: ControlEvent = serde_json::from_str(r#""restart""#).unwrap();
    assert_eq!(ev, ControlEvent::Restart);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let cfg = AnimationConfig {
        layout: GridLayout {
            rows: 0,
            cols: 2,
            cell_size: 10.0,
        },
        ..AnimationConfig::default()
    };
    assert!(Controller::new(cfg, Canvas::default(), PaletteName::Schema1, 0).is_err());
}
