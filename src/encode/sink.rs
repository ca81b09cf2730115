use crate::{
    foundation::{
        core::{Canvas, Fps, FrameIndex},
        error::{SlidecastError, SlidecastResult},
    },
    render::frame::FrameRGBA,
};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
    /// Exact number of frames that will be pushed.
    pub frame_count: u64,
}

impl SinkConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

/// Consumer of a composited frame stream (typically an external encoder).
///
/// Ordering contract: `push_frame` is called exactly `frame_count` times, in strictly increasing
/// `FrameIndex` order starting at 0, every frame matching the configured size. `end` is only
/// called after the last frame; a sink that is dropped without `end` must not leave a playable
/// partial output behind.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SlidecastResult<()>;
    fn end(&mut self) -> SlidecastResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in timeline order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
    pub ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SlidecastResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(SlidecastError::encode("push_frame called before begin"));
        };
        if idx.0 != self.frames.len() as u64 {
            return Err(SlidecastError::internal(format!(
                "frame {} pushed out of order (expected {})",
                idx.0,
                self.frames.len()
            )));
        }
        frame.check_size(cfg.canvas())?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SlidecastResult<()> {
        self.ended = true;
        Ok(())
    }
}
