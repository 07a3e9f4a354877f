//! Per-dot state machine: `Entering -> Walking (n jumps) -> FadingOut -> Removed`.
//!
//! [`advance`] is the only place a dot changes phase. It runs once per completed tween and
//! returns the single tween to schedule next, so a dot never has two tweens in flight.

use crate::{
    animation::tween::{TweenKind, TweenSpec, TweenTo},
    config::AnimationConfig,
    grid::dot::{Dot, DotPhase},
};

/// What the dispatcher does after a dot's tween completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Run this tween next.
    Schedule(TweenSpec),
    /// Fade finished; delete the dot from the live collection.
    Remove,
    /// Dot is already removed.
    Idle,
}

/// Direction of a jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Along x.
    Horizontal,
    /// Along y.
    Vertical,
}

/// Entrance tween, scheduled once per dot at build time.
pub fn enter(cfg: &AnimationConfig) -> TweenSpec {
    TweenSpec {
        kind: TweenKind::Enter,
        delay: 0.0,
        duration: cfg.enter_secs,
        ease: cfg.ease,
        to: TweenTo::Scale(1.0),
    }
}

/// Exit tween, scheduled after the last jump.
pub fn fade(cfg: &AnimationConfig) -> TweenSpec {
    TweenSpec {
        kind: TweenKind::Fade,
        delay: 0.0,
        duration: cfg.fade_secs,
        ease: cfg.ease,
        to: TweenTo::Opacity(0.0),
    }
}

/// One random axis-aligned jump from the dot's current position.
pub fn jump(dot: &Dot, cfg: &AnimationConfig, rng: &mut impl rand::Rng) -> TweenSpec {
    let cell = cfg.layout.cell_size;
    let axis = if rng.random_bool(0.5) {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let size = cell * uniform(rng, cfg.size_cells);
    let duration = uniform(rng, cfg.jump_duration_secs);
    let delay = uniform(rng, cfg.jump_delay_secs);
    let offset = (rng.random::<f64>() - 0.5) * cell * cfg.jump_span_cells * 2.0;

    let (x, y) = match axis {
        Axis::Horizontal => (Some(dot.position.x + offset), None),
        Axis::Vertical => (None, Some(dot.position.y + offset)),
    };

    TweenSpec {
        kind: TweenKind::Jump,
        delay,
        duration,
        ease: cfg.ease,
        to: TweenTo::Jump { x, y, size },
    }
}

/// Transition run when the dot's in-flight tween completes.
pub fn advance(dot: &mut Dot, cfg: &AnimationConfig, rng: &mut impl rand::Rng) -> Step {
    match dot.phase {
        DotPhase::Entering => {
            if cfg.jumps_per_dot == 0 {
                dot.phase = DotPhase::FadingOut;
                return Step::Schedule(fade(cfg));
            }
            dot.phase = DotPhase::Walking;
            Step::Schedule(jump(dot, cfg, rng))
        }
        DotPhase::Walking => {
            dot.action_count = dot.action_count.saturating_add(1).min(cfg.jumps_per_dot);
            if dot.action_count < cfg.jumps_per_dot {
                Step::Schedule(jump(dot, cfg, rng))
            } else {
                dot.phase = DotPhase::FadingOut;
                Step::Schedule(fade(cfg))
            }
        }
        DotPhase::FadingOut => {
            dot.phase = DotPhase::Removed;
            Step::Remove
        }
        DotPhase::Removed => Step::Idle,
    }
}

fn uniform(rng: &mut impl rand::Rng, (lo, hi): (f64, f64)) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lifecycle.rs"]
mod tests;
