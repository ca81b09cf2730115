use std::sync::mpsc::{Sender, SyncSender};

use rayon::prelude::*;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::FrameIndex,
        error::{SlidecastError, SlidecastResult},
    },
    render::{compositor::Compositor, frame::FrameRGBA},
};

/// `frames_done / frames_total` after each delivered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Progress {
    pub frames_done: u64,
    pub frames_total: u64,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.frames_total == 0 {
            return 1.0;
        }
        self.frames_done as f64 / self.frames_total as f64
    }

    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).floor().clamp(0.0, 100.0) as u8
    }
}

/// Best-effort side channel for render progress. Implementations must not fail the render.
pub trait ProgressSink {
    fn report(&self, progress: Progress);
}

/// Discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _progress: Progress) {}
}

/// Adapts a closure into a [`ProgressSink`].
pub struct ProgressFn<F>(pub F);

impl<F: Fn(Progress)> ProgressSink for ProgressFn<F> {
    fn report(&self, progress: Progress) {
        (self.0)(progress)
    }
}

impl ProgressSink for Sender<Progress> {
    fn report(&self, progress: Progress) {
        let _ = self.send(progress);
    }
}

impl ProgressSink for SyncSender<Progress> {
    fn report(&self, progress: Progress) {
        // A full or closed channel drops the update.
        let _ = self.try_send(progress);
    }
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// Stream every frame of `compositor` into `sink`, in order.
///
/// The sink sees `begin`, exactly `frame_count()` frames and `end`, or an error and no `end`.
#[tracing::instrument(
    skip_all,
    fields(frames = compositor.frame_count(), parallel = threading.parallel)
)]
pub fn render_to_sink(
    compositor: &Compositor<'_>,
    sink: &mut dyn FrameSink,
    threading: &RenderThreading,
    progress: &dyn ProgressSink,
) -> SlidecastResult<RenderStats> {
    let total = compositor.frame_count();
    if total == 0 {
        return Err(SlidecastError::configuration(format!(
            "timeline of {}s is shorter than one frame at {} fps",
            compositor.timeline().total_duration(),
            compositor.fps().as_f64()
        )));
    }

    let canvas = compositor.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: compositor.fps(),
        frame_count: total,
    })?;

    let mut stats = RenderStats {
        frames_total: total,
        ..RenderStats::default()
    };
    let mut deliver = |idx: FrameIndex, frame: &FrameRGBA| -> SlidecastResult<()> {
        if idx.0 != stats.frames_rendered {
            return Err(SlidecastError::internal(format!(
                "frame {} delivered out of order (expected {})",
                idx.0, stats.frames_rendered
            )));
        }
        frame.check_size(canvas)?;
        sink.push_frame(idx, frame)?;
        stats.frames_rendered += 1;
        progress.report(Progress {
            frames_done: stats.frames_rendered,
            frames_total: total,
        });
        Ok(())
    };

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = threading.chunk_size.max(1) as u64;
        let mut chunk_start = 0u64;
        while chunk_start < total {
            let chunk_end = (chunk_start + chunk_size).min(total);
            let frames = pool.install(|| {
                (chunk_start..chunk_end)
                    .into_par_iter()
                    .map(|k| compositor.render_frame(FrameIndex(k)))
                    .collect::<SlidecastResult<Vec<_>>>()
            })?;
            for (k, frame) in (chunk_start..chunk_end).zip(frames.iter()) {
                deliver(FrameIndex(k), frame)?;
            }
            chunk_start = chunk_end;
        }
    } else {
        for item in compositor.frames() {
            let (idx, frame) = item?;
            deliver(idx, &frame)?;
        }
    }

    if stats.frames_rendered != total {
        return Err(SlidecastError::internal(format!(
            "rendered {} frames, expected {total}",
            stats.frames_rendered
        )));
    }

    sink.end()?;
    tracing::info!(frames = total, "render complete");
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> SlidecastResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlidecastError::configuration(
            "render 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlidecastError::configuration(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
