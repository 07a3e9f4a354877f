use crate::{
    animation::ease::Ease,
    foundation::error::{DotwalkError, DotwalkResult},
    grid::layout::GridLayout,
};

/// Grid and timing constants for the dot lifecycle. All times are in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    /// Grid dimensions and cell size.
    pub layout: GridLayout,
    /// Duration of the scale-in.
    pub enter_secs: f64,
    /// Uniform range of the delay before each jump starts.
    pub jump_delay_secs: (f64, f64),
    /// Uniform range of each jump's duration.
    pub jump_duration_secs: (f64, f64),
    /// Duration of the fade-out.
    pub fade_secs: f64,
    /// Jumps each dot makes before fading.
    pub jumps_per_dot: u8,
    /// Half-width of the jump offset, in cells (offset is `cell * [-span, +span]`).
    pub jump_span_cells: f64,
    /// Range of the per-jump size, in cells.
    pub size_cells: (f64, f64),
    /// Curve shared by every tween.
    pub ease: Ease,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            enter_secs: 2.0,
            jump_delay_secs: (0.0, 2.0),
            jump_duration_secs: (1.0, 4.0),
            fade_secs: 1.0,
            jumps_per_dot: 3,
            jump_span_cells: 10.0,
            size_cells: (1.0, 2.0),
            ease: Ease::OutQuad,
        }
    }
}

impl AnimationConfig {
    /// Reject an invalid layout, negative or non-finite times and inverted ranges.
    pub fn validate(&self) -> DotwalkResult<()> {
        self.layout.validate()?;

        fn secs(name: &str, v: f64) -> DotwalkResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(DotwalkError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
            Ok(())
        }
        fn range(name: &str, (lo, hi): (f64, f64)) -> DotwalkResult<()> {
            secs(name, lo)?;
            secs(name, hi)?;
            if lo > hi {
                return Err(DotwalkError::validation(format!("{name} range is inverted")));
            }
            Ok(())
        }

        secs("enter_secs", self.enter_secs)?;
        secs("fade_secs", self.fade_secs)?;
        secs("jump_span_cells", self.jump_span_cells)?;
        range("jump_delay_secs", self.jump_delay_secs)?;
        range("jump_duration_secs", self.jump_duration_secs)?;
        range("size_cells", self.size_cells)?;
        Ok(())
    }

    /// Upper bound on how long one dot lives, from build to removal.
    pub fn max_lifetime_secs(&self) -> f64 {
        let per_jump = self.jump_delay_secs.1 + self.jump_duration_secs.1;
        self.enter_secs + f64::from(self.jumps_per_dot) * per_jump + self.fade_secs
    }
}
