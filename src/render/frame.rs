/// One rendered frame, RGBA8, row-major, no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// True when color channels are already multiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Channels at (`x`, `y`), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = (((u16::from(*c) * 255) + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Per-renderer drawing options.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Straight RGBA the surface is cleared to each frame; `None` is transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Trail stroke width in pixels.
    pub line_width: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            line_width: 1.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
