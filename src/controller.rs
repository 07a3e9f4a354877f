use rand::{SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        lifecycle::{self, Step},
        tween::{Completion, Timeline},
    },
    config::AnimationConfig,
    foundation::{core::Canvas, error::DotwalkResult},
    grid::{
        dot::Generation,
        palette::{Palette, PaletteName},
    },
    session::AnimationSession,
};

/// External triggers: the restart control and the palette selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    /// Rebuild the grid with the active palette.
    Restart,
    /// Switch palette and rebuild.
    SelectPalette(PaletteName),
}

/// What one [`Controller::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tweens that reached their end.
    pub completed: usize,
    /// Dots removed after their fade.
    pub removed: usize,
    /// Completions dropped because their dot belongs to a discarded generation.
    pub stale: usize,
}

/// Owns the current [`AnimationSession`], the tween [`Timeline`] and the random source, and
/// dispatches tween completions through the lifecycle state machine.
pub struct Controller {
    cfg: AnimationConfig,
    canvas: Canvas,
    palette: PaletteName,
    session: AnimationSession,
    timeline: Timeline,
    rng: StdRng,
    restarts: u64,
}

impl Controller {
    /// Build generation 1 and schedule its entrance tweens.
    pub fn new(
        cfg: AnimationConfig,
        canvas: Canvas,
        palette: PaletteName,
        seed: u64,
    ) -> DotwalkResult<Self> {
        cfg.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let session =
            AnimationSession::build(&cfg, canvas, Palette::get(palette), Generation(1), &mut rng)?;

        let mut this = Self {
            cfg,
            canvas,
            palette,
            session,
            timeline: Timeline::new(),
            rng,
            restarts: 0,
        };
        this.schedule_entrances();
        Ok(this)
    }

    /// Timing and layout constants.
    pub fn config(&self) -> &AnimationConfig {
        &self.cfg
    }

    /// Canvas the grid is centered on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Active palette; used by the next restart.
    pub fn palette(&self) -> PaletteName {
        self.palette
    }

    /// Dots of the current generation.
    pub fn session(&self) -> &AnimationSession {
        &self.session
    }

    /// Pending tweens.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Rebuilds since construction.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Discard every dot and in-flight tween, then build and animate a fresh grid with the
    /// active palette.
    #[tracing::instrument(skip(self), fields(palette = %self.palette))]
    pub fn restart(&mut self) -> DotwalkResult<()> {
        let generation = self.session.generation().next();
        let session = AnimationSession::build(
            &self.cfg,
            self.canvas,
            Palette::get(self.palette),
            generation,
            &mut self.rng,
        )?;
        self.session = session;

        let cancelled = self.timeline.cancel_stale(generation);
        self.schedule_entrances();
        self.restarts += 1;

        tracing::info!(
            generation = generation.0,
            dots = self.session.len(),
            cancelled,
            "grid restarted"
        );
        Ok(())
    }

    /// Make `name` the active palette, then restart.
    pub fn select_palette(&mut self, name: PaletteName) -> DotwalkResult<()> {
        self.palette = name;
        self.restart()
    }

    /// Run one control event.
    pub fn apply(&mut self, event: ControlEvent) -> DotwalkResult<()> {
        match event {
            ControlEvent::Restart => self.restart(),
            ControlEvent::SelectPalette(name) => self.select_palette(name),
        }
    }

    /// Advance all tweens by `dt` seconds and run the state machine for each completion.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        let completions = self.timeline.tick(dt, &mut self.session);
        let mut report = TickReport::default();
        for c in completions {
            report.completed += 1;
            self.dispatch(c, &mut report);
        }
        report
    }

    /// True once every dot of the current generation has been removed.
    pub fn is_idle(&self) -> bool {
        self.session.is_empty() && self.timeline.is_empty()
    }

    fn dispatch(&mut self, c: Completion, report: &mut TickReport) {
        if c.key.generation != self.session.generation() {
            tracing::debug!(key = ?c.key, "dropping completion from a discarded generation");
            report.stale += 1;
            return;
        }
        let Some(dot) = self.session.dot_mut(c.key) else {
            tracing::debug!(key = ?c.key, "dropping completion for a removed dot");
            report.stale += 1;
            return;
        };

        match lifecycle::advance(dot, &self.cfg, &mut self.rng) {
            Step::Schedule(spec) => self.timeline.schedule(c.key, spec),
            Step::Remove => {
                if self.session.remove(c.key).is_some() {
                    report.removed += 1;
                    tracing::trace!(key = ?c.key, live = self.session.len(), "dot removed");
                }
            }
            Step::Idle => {}
        }
    }

    fn schedule_entrances(&mut self) {
        let spec = lifecycle::enter(&self.cfg);
        for dot in self.session.dots() {
            self.timeline.schedule(dot.key(), spec);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/controller.rs"]
mod tests;
