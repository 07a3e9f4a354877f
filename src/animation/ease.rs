/// Easing curves for tweens. `OutQuad` matches the usual tween-library default (`power1.out`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Accelerating.
    InQuad,
    /// Decelerating.
    #[default]
    OutQuad,
    /// Accelerating, then decelerating.
    InOutQuad,
}

impl Ease {
    /// Map linear progress `t` (clamped to `0..=1`) onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }

    /// Eased interpolation from `a` to `b`; exact at both ends.
    pub fn lerp(self, a: f64, b: f64, t: f64) -> f64 {
        let k = self.apply(t);
        if k >= 1.0 { b } else { a + (b - a) * k }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
