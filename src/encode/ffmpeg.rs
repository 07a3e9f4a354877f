use std::{
    io::{Read as _, Write as _},
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use crate::{
    encode::sink::{FrameSink, SinkConfig, ensure_parent_dir},
    foundation::{
        core::FrameIndex,
        error::{DotwalkError, DotwalkResult},
    },
    render::frame::FrameRGBA,
};

/// Output options for [`FfmpegSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mp4Options {
    /// Destination `.mp4` path; parent directories are created on `begin`.
    pub out_path: PathBuf,
    /// Replace an existing file instead of failing.
    pub overwrite: bool,
    /// Straight-alpha RGBA8 color that translucent pixels are flattened onto.
    pub background: [u8; 4],
}

impl Mp4Options {
    /// Overwriting output at `out_path` on a white background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: [255, 255, 255, 255],
        }
    }

    /// Replace the flattening background.
    pub fn background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }

    /// Set whether an existing output file may be replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Return `true` when `ffmpeg -version` runs successfully from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// [`FrameSink`] that pipes flattened RGBA frames into the system `ffmpeg` (libx264, yuv420p).
///
/// The child process starts in `begin` and is reaped in `end`. A sink dropped between the two
/// (for example after a render error) kills the child instead of leaving it running.
pub struct FfmpegSink {
    opts: Mp4Options,
    encoder: Option<EncoderProcess>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    /// Sink that has not started `ffmpeg` yet.
    pub fn new(opts: Mp4Options) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            scratch: Vec::new(),
        }
    }

    /// Options this sink was built with.
    pub fn options(&self) -> &Mp4Options {
        &self.opts
    }

    fn ffmpeg_command(&self, cfg: SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"]);
        cmd.args(["-s", &format!("{}x{}", cfg.width, cfg.height)]);
        // Input rate goes before `-i` for rawvideo; rational fps as `num/den`.
        cmd.args(["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den)]);
        cmd.args(["-i", "pipe:0", "-an"]);
        cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> DotwalkResult<()> {
        if self.encoder.is_some() {
            return Err(DotwalkError::encode("ffmpeg sink already started"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(DotwalkError::validation(
                "mp4 width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(DotwalkError::validation(format!(
                "mp4 size {}x{} must be even (yuv420p)",
                cfg.width, cfg.height
            )));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(DotwalkError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(DotwalkError::encode(
                "ffmpeg is required for MP4 output, but was not found on PATH",
            ));
        }

        self.encoder = Some(EncoderProcess::spawn(self.ffmpeg_command(cfg))?);
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> DotwalkResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg, self.encoder.as_mut()) else {
            return Err(DotwalkError::encode("ffmpeg sink used before begin"));
        };
        self.last_idx = Some(next_in_order(self.last_idx, idx)?);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(DotwalkError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.opts.background,
        )?;
        encoder.write(&self.scratch)
    }

    fn end(&mut self) -> DotwalkResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| DotwalkError::encode("ffmpeg sink ended before begin"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::info!(out = %self.opts.out_path.display(), last_frame = ?self.last_idx, "mp4 written");
        Ok(())
    }
}

/// Frames must arrive with strictly increasing indices.
fn next_in_order(last: Option<FrameIndex>, idx: FrameIndex) -> DotwalkResult<FrameIndex> {
    match last {
        Some(last) if idx.0 <= last.0 => Err(DotwalkError::encode(format!(
            "frame {} pushed after frame {}",
            idx.0, last.0
        ))),
        _ => Ok(idx),
    }
}

/// A child encoder fed through stdin. Stderr is drained on its own thread so a chatty child
/// cannot fill the pipe and stall our writes.
struct EncoderProcess {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl EncoderProcess {
    fn spawn(mut cmd: Command) -> DotwalkResult<Self> {
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        let mut child = cmd
            .spawn()
            .map_err(|e| DotwalkError::encode(format!("failed to spawn encoder: {e}")))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });

        let mut this = Self {
            child: Some(child),
            stdin,
            stderr,
        };
        if this.stdin.is_none() || this.stderr.is_none() {
            this.kill();
            return Err(DotwalkError::encode("encoder pipes were not opened"));
        }
        Ok(this)
    }

    fn write(&mut self, bytes: &[u8]) -> DotwalkResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| DotwalkError::encode("encoder stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| DotwalkError::encode(format!("failed to write frame to encoder: {e}")))
    }

    /// Close stdin, wait for exit and report a failure status with the captured stderr.
    fn finish(mut self) -> DotwalkResult<()> {
        drop(self.stdin.take());
        let Some(mut child) = self.child.take() else {
            return Err(DotwalkError::encode("encoder already reaped"));
        };
        let status = child
            .wait()
            .map_err(|e| DotwalkError::encode(format!("failed to wait for encoder: {e}")))?;

        let stderr = match self.stderr.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| DotwalkError::encode("encoder stderr thread panicked"))?
                .map_err(|e| DotwalkError::encode(format!("reading encoder stderr: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            return Err(DotwalkError::encode(format!(
                "encoder exited with {status}: {}",
                String::from_utf8_lossy(&stderr).trim()
            )));
        }
        Ok(())
    }

    fn kill(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EncoderProcess {
    fn drop(&mut self) {
        if self.child.is_some() {
            tracing::warn!("encoder dropped before finish; killing it");
            self.kill();
        }
    }
}

/// Composite RGBA8 over an opaque background so every output alpha is 255.
fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> DotwalkResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DotwalkError::validation(
            "frame data does not match width*height*4",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for ch in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[ch])
            } else {
                mul_div255(u16::from(s[ch]), a)
            };
            d[ch] = (fg + mul_div255(u16::from(bg_rgba[ch]), inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    ((u32::from(x) * u32::from(y) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
