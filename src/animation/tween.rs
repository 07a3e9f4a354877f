use crate::{
    animation::ease::Ease,
    foundation::core::Point,
    grid::dot::{Dot, DotKey, Generation},
};

/// Which lifecycle step a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TweenKind {
    /// Scale-in.
    Enter,
    /// One axis-aligned move.
    Jump,
    /// Fade-out.
    Fade,
}

/// Target values of a tween. Start values are read from the dot when the delay elapses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenTo {
    /// Final circle scale.
    Scale(f64),
    /// Axis-aligned move; `None` leaves that axis alone.
    Jump {
        /// Target x of the dot's cell origin.
        x: Option<f64>,
        /// Target y of the dot's cell origin.
        y: Option<f64>,
        /// Diameter at the end of the move.
        size: f64,
    },
    /// Final opacity.
    Opacity(f64),
}

/// A tween to schedule: what it drives, when it starts and where it ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    /// Lifecycle step reported on completion.
    pub kind: TweenKind,
    /// Seconds to wait before start values are captured.
    pub delay: f64,
    /// Seconds from start to end.
    pub duration: f64,
    /// Interpolation curve.
    pub ease: Ease,
    /// End values.
    pub to: TweenTo,
}

/// Reported once per tween that ran to its end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Dot the tween animated.
    pub key: DotKey,
    /// Step that finished.
    pub kind: TweenKind,
}

/// Owner of the dots a [`Timeline`] animates.
pub trait TweenHost {
    /// The live dot for `key`, or `None` if it is gone or belongs to another generation.
    fn dot_mut(&mut self, key: DotKey) -> Option<&mut Dot>;
}

#[derive(Clone, Copy, Debug)]
enum StartValues {
    Scale(f64),
    Jump { x: f64, y: f64, size: f64 },
    Opacity(f64),
}

#[derive(Clone, Debug)]
struct ActiveTween {
    key: DotKey,
    spec: TweenSpec,
    elapsed: f64,
    start: Option<StartValues>,
}

/// Delayed, eased tweens keyed by [`DotKey`], advanced by explicit `tick` calls.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tweens: Vec<ActiveTween>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `spec` for `key`. Negative delays and durations are treated as zero.
    pub fn schedule(&mut self, key: DotKey, spec: TweenSpec) {
        let spec = TweenSpec {
            delay: non_negative(spec.delay),
            duration: non_negative(spec.duration),
            ..spec
        };
        self.tweens.push(ActiveTween {
            key,
            spec,
            elapsed: 0.0,
            start: None,
        });
    }

    /// Advance every tween by `dt` seconds and return completions in schedule order.
    ///
    /// Tweens whose dot is gone from `host` are discarded without a completion.
    pub fn tick(&mut self, dt: f64, host: &mut impl TweenHost) -> Vec<Completion> {
        let dt = non_negative(dt);
        let mut done = Vec::new();

        self.tweens.retain_mut(|tw| {
            let Some(dot) = host.dot_mut(tw.key) else {
                tracing::trace!(key = ?tw.key, "tween target is gone; discarding");
                return false;
            };

            tw.elapsed += dt;
            if tw.elapsed < tw.spec.delay {
                return true;
            }

            let spec = tw.spec;
            let start = *tw.start.get_or_insert_with(|| begin(dot, &spec));
            let active = tw.elapsed - spec.delay;
            let t = if spec.duration <= 0.0 {
                1.0
            } else {
                (active / spec.duration).min(1.0)
            };
            apply(dot, start, &spec, t);

            if t >= 1.0 {
                done.push(Completion {
                    key: tw.key,
                    kind: spec.kind,
                });
                false
            } else {
                true
            }
        });

        done
    }

    /// Drop every tween not belonging to `current`; returns how many were dropped.
    pub fn cancel_stale(&mut self, current: Generation) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|tw| tw.key.generation == current);
        before - self.tweens.len()
    }

    /// Tweens still queued or running for `key`.
    pub fn pending_for(&self, key: DotKey) -> usize {
        self.tweens.iter().filter(|tw| tw.key == key).count()
    }

    /// Tweens still queued or running.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Capture start values. A jump also records its origin into the dot's trail.
fn begin(dot: &mut Dot, spec: &TweenSpec) -> StartValues {
    match spec.to {
        TweenTo::Scale(_) => StartValues::Scale(dot.scale),
        TweenTo::Opacity(_) => StartValues::Opacity(dot.opacity),
        TweenTo::Jump { x, y, .. } => {
            let from = dot.position;
            dot.trail.from = from;
            dot.trail.to = Point::new(x.unwrap_or(from.x), y.unwrap_or(from.y));
            StartValues::Jump {
                x: from.x,
                y: from.y,
                size: dot.size,
            }
        }
    }
}

fn apply(dot: &mut Dot, start: StartValues, spec: &TweenSpec, t: f64) {
    let ease = spec.ease;
    match (start, spec.to) {
        (StartValues::Scale(s0), TweenTo::Scale(s1)) => dot.scale = ease.lerp(s0, s1, t),
        (StartValues::Opacity(o0), TweenTo::Opacity(o1)) => dot.opacity = ease.lerp(o0, o1, t),
        (StartValues::Jump { x, y, size }, TweenTo::Jump { x: tx, y: ty, size: ts }) => {
            if let Some(tx) = tx {
                dot.position.x = ease.lerp(x, tx, t);
            }
            if let Some(ty) = ty {
                dot.position.y = ease.lerp(y, ty, t);
            }
            dot.size = ease.lerp(size, ts, t);
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
