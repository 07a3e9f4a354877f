use crate::{
    animation::tween::TweenHost,
    config::AnimationConfig,
    foundation::{core::Canvas, error::DotwalkResult},
    grid::{
        dot::{Dot, DotKey, Generation},
        palette::Palette,
    },
};

/// One grid-build epoch: the live dots, the palette they were colored from, and their
/// generation. A restart replaces the whole session.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    generation: Generation,
    canvas: Canvas,
    palette: Palette,
    /// Live dots in build order (sorted by id).
    dots: Vec<Dot>,
    removed: usize,
}

impl AnimationSession {
    /// Lay out a fresh grid for `generation`, coloring each dot from `palette`.
    pub fn build(
        cfg: &AnimationConfig,
        canvas: Canvas,
        palette: Palette,
        generation: Generation,
        rng: &mut impl rand::Rng,
    ) -> DotwalkResult<Self> {
        let dots = cfg.layout.build(canvas, &palette, generation, rng)?;
        Ok(Self {
            generation,
            canvas,
            palette,
            dots,
            removed: 0,
        })
    }

    /// Build epoch of these dots.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Canvas the grid was centered on.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Palette the dots were colored from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Live dots sorted by id.
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    /// Live dot count.
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    /// True once every dot has been removed.
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Number of dots removed after their fade completed.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Live dot for `key`, if it belongs to this generation.
    pub fn get(&self, key: DotKey) -> Option<&Dot> {
        let idx = self.index_of(key)?;
        self.dots.get(idx)
    }

    /// True if `key` names a live dot of this generation.
    pub fn contains(&self, key: DotKey) -> bool {
        self.index_of(key).is_some()
    }

    /// Delete a dot from the live collection. Returns `None` if it is already gone or belongs
    /// to another generation, so a second call is a no-op.
    pub(crate) fn remove(&mut self, key: DotKey) -> Option<Dot> {
        let idx = self.index_of(key)?;
        self.removed += 1;
        Some(self.dots.remove(idx))
    }

    pub(crate) fn dot_mut(&mut self, key: DotKey) -> Option<&mut Dot> {
        let idx = self.index_of(key)?;
        self.dots.get_mut(idx)
    }

    fn index_of(&self, key: DotKey) -> Option<usize> {
        if key.generation != self.generation {
            return None;
        }
        self.dots.binary_search_by_key(&key.id, |d| d.id).ok()
    }
}

impl TweenHost for AnimationSession {
    fn dot_mut(&mut self, key: DotKey) -> Option<&mut Dot> {
        AnimationSession::dot_mut(self, key)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
