use crate::{
    controller::Controller,
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Fps, FrameIndex, FrameRange},
        error::DotwalkResult,
    },
    render::{cpu::CpuRenderer, frame::FrameRGBA},
    script::ScheduledEvent,
};

/// Summary of one [`FrameLoop::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed into the sink.
    pub frames_rendered: u64,
    /// Restarts triggered during the run.
    pub restarts: u64,
    /// Most dots alive on any rendered frame.
    pub peak_live: usize,
    /// Dots alive on the last frame.
    pub final_live: usize,
}

/// Drives a [`Controller`] at a fixed frame rate and feeds rendered frames into a sink.
///
/// Per frame:
/// 1. apply script events whose `at_secs` is at or before the frame time;
/// 2. advance the controller by one frame duration (skipped on the first frame of the run);
/// 3. draw the session;
/// 4. push the frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameLoop {
    fps: Fps,
}

impl FrameLoop {
    /// Loop ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self { fps }
    }

    /// Loop frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Time of `frame` on the loop clock, in seconds.
    pub fn frame_time_secs(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }

    /// Render `range` into `sink`, firing `events` on the frames they fall on.
    ///
    /// The sink is not ended when a frame fails; the error is returned as is.
    #[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0, fps = self.fps.as_f64()))]
    pub fn run(
        &self,
        range: FrameRange,
        controller: &mut Controller,
        renderer: &mut CpuRenderer,
        sink: &mut dyn FrameSink,
        events: &[ScheduledEvent],
    ) -> DotwalkResult<RenderStats> {
        let canvas = controller.canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;

        let restarts_before = controller.restarts();
        let mut cursor = 0usize;
        let mut stats = RenderStats::default();

        for idx in range.iter() {
            self.step(idx, idx == range.start, controller, events, &mut cursor)?;

            let frame = renderer.draw(controller.session())?;
            sink.push_frame(idx, &frame)?;

            stats.frames_rendered += 1;
            stats.peak_live = stats.peak_live.max(controller.session().len());
        }

        sink.end()?;

        stats.restarts = controller.restarts() - restarts_before;
        stats.final_live = controller.session().len();
        tracing::info!(
            frames = stats.frames_rendered,
            restarts = stats.restarts,
            peak_live = stats.peak_live,
            final_live = stats.final_live,
            "render finished"
        );
        Ok(stats)
    }

    /// Step from frame 0 up to `frame` without a sink and draw only that frame.
    pub fn render_frame_at(
        &self,
        frame: FrameIndex,
        controller: &mut Controller,
        renderer: &mut CpuRenderer,
        events: &[ScheduledEvent],
    ) -> DotwalkResult<FrameRGBA> {
        let mut cursor = 0usize;
        for idx in 0..=frame.0 {
            self.step(FrameIndex(idx), idx == 0, controller, events, &mut cursor)?;
        }
        renderer.draw(controller.session())
    }

    fn step(
        &self,
        idx: FrameIndex,
        first: bool,
        controller: &mut Controller,
        events: &[ScheduledEvent],
        cursor: &mut usize,
    ) -> DotwalkResult<()> {
        let now = self.frame_time_secs(idx);
        while let Some(ev) = events.get(*cursor).filter(|ev| ev.at_secs <= now) {
            tracing::debug!(at = ev.at_secs, event = ?ev.event, frame = idx.0, "control event");
            controller.apply(ev.event)?;
            *cursor += 1;
        }

        if !first {
            let report = controller.tick(self.fps.frame_duration_secs());
            if report.stale > 0 {
                tracing::debug!(frame = idx.0, stale = report.stale, "stale completions dropped");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
