use crate::foundation::core::{Point, Rgba8Premul};

/// Build epoch of a grid. Every restart gets a strictly larger value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation built after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Position of a dot in build order; unique within one generation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct DotId(pub u32);

/// Identity of a dot across generations. Every scheduled tween carries one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct DotKey {
    /// Dot within its grid.
    pub id: DotId,
    /// Grid the dot belongs to.
    pub generation: Generation,
}

/// Lifecycle stage of a dot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DotPhase {
    /// Scaling in from zero.
    Entering,
    /// Making its axis-aligned jumps.
    Walking,
    /// Fading to zero opacity.
    FadingOut,
    /// Taken out of the session; never animated again.
    Removed,
}

/// Connecting line from the start of the most recent jump.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Trail {
    /// Where the last jump started.
    pub from: Point,
    /// Where the last jump ends.
    pub to: Point,
}

/// One animated grid cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Dot {
    /// Build-order id within the grid.
    pub id: DotId,
    /// Grid the dot was built for.
    pub generation: Generation,
    /// Top-left of the dot's bounding cell.
    pub position: Point,
    /// Diameter in pixels at full scale.
    pub size: f64,
    /// Fill and trail color, picked from the palette at build time.
    pub color: Rgba8Premul,
    /// Jumps completed so far.
    pub action_count: u8,
    /// Circle scale in `0..=1`.
    pub scale: f64,
    /// Layer opacity in `0..=1`.
    pub opacity: f64,
    /// Line drawn back to the start of the latest jump.
    pub trail: Trail,
    /// Current lifecycle stage.
    pub phase: DotPhase,
}

impl Dot {
    /// Fresh dot at `position`: entering, scale 0, fully opaque and with an empty trail.
    pub fn new(
        id: DotId,
        generation: Generation,
        position: Point,
        size: f64,
        color: Rgba8Premul,
    ) -> Self {
        Self {
            id,
            generation,
            position,
            size,
            color,
            action_count: 0,
            scale: 0.0,
            opacity: 1.0,
            trail: Trail {
                from: position,
                to: position,
            },
            phase: DotPhase::Entering,
        }
    }

    /// Generation-tagged identity used to schedule tweens for this dot.
    pub fn key(&self) -> DotKey {
        DotKey {
            id: self.id,
            generation: self.generation,
        }
    }

    /// Circle center: the dot is drawn inside the `size`-wide box at `position`.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size / 2.0,
            self.position.y + self.size / 2.0,
        )
    }
}
