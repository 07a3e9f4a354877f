//! dotwalk animates a centered grid of colored dots through a short random walk and renders it
//! headlessly.
//!
//! Every dot runs the same lifecycle: it scales in, makes three random axis-aligned jumps
//! (leaving a line back to where each jump started), fades out and is removed. A restart or a
//! palette change throws the whole grid away and builds a fresh one.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `GridLayout + Palette -> AnimationSession` (one generation of dots)
//! 2. **Animate**: `Controller::tick` advances the tween `Timeline` and runs each completion
//!    through the lifecycle state machine
//! 3. **Render**: `AnimationSession -> FrameRGBA` (CPU backend, premultiplied RGBA8)
//! 4. **Sink**: `FrameLoop` pushes frames into an in-memory buffer, a PNG sequence or the system
//!    `ffmpeg` binary
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Seeded randomness**: every random draw comes from one injected `rand` generator, so the
//!   same seed replays the same animation.
//! - **Generation tagging**: tweens carry a [`DotKey`]; work belonging to a discarded grid is
//!   cancelled on restart and ignored if it still completes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod controller;
mod encode;
mod foundation;
mod grid;
mod render;
mod script;
mod session;

pub use animation::ease::Ease;
pub use animation::lifecycle::{Axis, Step, advance, enter, fade, jump};
pub use animation::tween::{Completion, Timeline, TweenHost, TweenKind, TweenSpec, TweenTo};
pub use config::AnimationConfig;
pub use controller::{ControlEvent, Controller, TickReport};
pub use encode::ffmpeg::{FfmpegSink, Mp4Options, is_ffmpeg_on_path};
pub use encode::sink::{
    FrameSink, InMemorySink, PngSequenceSink, SinkConfig, ensure_parent_dir, write_png,
};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8Premul, Vec2};
pub use foundation::error::{DotwalkError, DotwalkResult};
pub use grid::dot::{Dot, DotId, DotKey, DotPhase, Generation, Trail};
pub use grid::layout::GridLayout;
pub use grid::palette::{PALETTE_LEN, Palette, PaletteName, parse_hex_rgb};
pub use render::cpu::CpuRenderer;
pub use render::frame::{FrameRGBA, RenderSettings};
pub use render::pipeline::{FrameLoop, RenderStats};
pub use script::{DEFAULT_SEED, ScheduledEvent, Show};
pub use session::AnimationSession;
