use std::{fs::File, io::BufReader, path::Path};

use crate::{
    controller::ControlEvent,
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8Premul},
        error::{DotwalkError, DotwalkResult},
    },
    grid::palette::{PaletteName, parse_hex_rgb},
};

/// A control event fired once the loop clock reaches `at_secs`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledEvent {
    /// Loop time in seconds.
    pub at_secs: f64,
    /// What to do.
    pub event: ControlEvent,
}

/// JSON show file: everything needed to render a run headlessly.
///
/// Every field is optional:
///
/// ```json
/// { "canvas": {"width": 640, "height": 720}, "fps": {"num": 30, "den": 1},
///   "duration_secs": 12.0, "seed": 7, "palette": "Schema 2", "background": "#FFFFFF",
///   "events": [ {"at_secs": 4.0, "event": "restart"},
///               {"at_secs": 8.0, "event": {"select_palette": "Schema 3"}} ] }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Show {
    /// Output size; 1280x720 by default.
    #[serde(default)]
    pub canvas: Canvas,
    /// Loop rate; 30/1 by default.
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Length of the run in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// Seed for every random draw.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Palette of the first grid.
    #[serde(default)]
    pub palette: PaletteName,
    /// `#RRGGBB` or `#RRGGBBAA` fill behind the dots; transparent when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Control events in non-decreasing time order.
    #[serde(default)]
    pub events: Vec<ScheduledEvent>,
}

/// Seed used when a show file does not name one.
pub const DEFAULT_SEED: u64 = 1;

fn default_fps() -> Fps {
    Fps { num: 30, den: 1 }
}

// Long enough for a full grid lifetime with default timings.
fn default_duration_secs() -> f64 {
    22.0
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for Show {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: default_fps(),
            duration_secs: default_duration_secs(),
            seed: DEFAULT_SEED,
            palette: PaletteName::default(),
            background: None,
            events: Vec::new(),
        }
    }
}

impl Show {
    /// Parse show JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> DotwalkResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    /// Read and parse a show file.
    pub fn from_path(path: impl AsRef<Path>) -> DotwalkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DotwalkError::validation(format!("open show JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check timings, dimensions and colors. `even_dims` is required by yuv420p MP4 output.
    pub fn validate(&self, even_dims: bool) -> DotwalkResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        Fps::new(self.fps.num, self.fps.den)?;
        let odd = !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2);
        if even_dims && odd {
            return Err(DotwalkError::validation(format!(
                "canvas {}x{} must have even dimensions for mp4 output",
                self.canvas.width, self.canvas.height
            )));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(DotwalkError::validation(
                "duration_secs must be finite and non-negative",
            ));
        }

        let mut prev = 0.0f64;
        for (i, ev) in self.events.iter().enumerate() {
            if !ev.at_secs.is_finite() || ev.at_secs < 0.0 {
                return Err(DotwalkError::validation(format!(
                    "events[{i}].at_secs must be finite and non-negative"
                )));
            }
            if ev.at_secs < prev {
                return Err(DotwalkError::validation(format!(
                    "events[{i}].at_secs ({}) is earlier than the previous event ({prev})",
                    ev.at_secs
                )));
            }
            prev = ev.at_secs;
        }

        self.background_color()?;
        Ok(())
    }

    /// Parsed `background`, if any.
    pub fn background_color(&self) -> DotwalkResult<Option<Rgba8Premul>> {
        self.background.as_deref().map(parse_hex_rgb).transpose()
    }

    /// Frames needed to cover `duration_secs`.
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_ceil(self.duration_secs)
    }

    /// `0..frame_count()`.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
