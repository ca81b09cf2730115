use std::{
    path::{Path, PathBuf},
    sync::mpsc::Sender,
    thread::JoinHandle,
};

use crate::{
    assets::decode::expand_image_inputs,
    effects::kind::EffectKind,
    encode::{ffmpeg::FfmpegSink, sink::FrameSink},
    foundation::error::{SlidecastError, SlidecastResult},
    render::{
        compositor::Compositor,
        pipeline::{Progress, ProgressSink, RenderThreading, render_to_sink},
    },
    session::config::SlideshowConfig,
    timeline::{builder::Timeline, slide::Slide},
};

/// Decode every input image, expanding directories.
///
/// Images that fail to decode are logged and skipped; an all-failed list surfaces later as an
/// empty-slide-list configuration error.
pub fn load_slides(inputs: &[PathBuf]) -> SlidecastResult<Vec<Slide>> {
    let paths = expand_image_inputs(inputs)?;
    let mut slides = Vec::with_capacity(paths.len());
    for path in &paths {
        match Slide::from_path(path) {
            Ok(slide) => slides.push(slide),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping image"),
        }
    }
    tracing::debug!(requested = paths.len(), loaded = slides.len(), "slides loaded");
    Ok(slides)
}

/// Load `images` and build their timeline under `config`.
pub fn plan(images: &[PathBuf], config: &SlideshowConfig) -> SlidecastResult<Timeline> {
    let builder = config.timeline_builder()?;
    builder.build(load_slides(images)?)
}

/// One end-to-end slideshow request: images in, MP4 out.
#[derive(Clone, Debug)]
pub struct SlideshowJob {
    pub images: Vec<PathBuf>,
    pub config: SlideshowConfig,
    pub out_path: PathBuf,
    pub overwrite: bool,
    pub threading: RenderThreading,
}

/// Summary of a finished render.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RenderReport {
    pub out_path: PathBuf,
    pub image_count: usize,
    pub frame_count: u64,
    pub duration_secs: f64,
    pub seed: u64,
    pub junctions: Vec<EffectKind>,
}

impl SlideshowJob {
    pub fn new(images: Vec<PathBuf>, config: SlideshowConfig, out_path: impl Into<PathBuf>) -> Self {
        Self {
            images,
            config,
            out_path: out_path.into(),
            overwrite: true,
            threading: RenderThreading::default(),
        }
    }

    /// Render to the configured MP4 path through ffmpeg.
    pub fn run(&self, progress: &dyn ProgressSink) -> SlidecastResult<RenderReport> {
        let mut sink = FfmpegSink::new(self.out_path.clone(), self.overwrite);
        self.run_with_sink(&mut sink, progress)
    }

    /// Render into an arbitrary sink; the report still names `out_path`.
    #[tracing::instrument(skip_all, fields(out = %self.out_path.display(), images = self.images.len()))]
    pub fn run_with_sink(
        &self,
        sink: &mut dyn FrameSink,
        progress: &dyn ProgressSink,
    ) -> SlidecastResult<RenderReport> {
        let timeline = plan(&self.images, &self.config)?;
        let compositor = Compositor::new(&timeline, self.config.fps()?)?;
        let stats = render_to_sink(&compositor, sink, &self.threading, progress)?;

        let report = RenderReport {
            out_path: self.out_path.clone(),
            image_count: timeline.len(),
            frame_count: stats.frames_rendered,
            duration_secs: timeline.total_duration(),
            seed: timeline.seed(),
            junctions: timeline.junctions().to_vec(),
        };
        tracing::info!(
            images = report.image_count,
            frames = report.frame_count,
            seed = report.seed,
            "slideshow rendered"
        );
        Ok(report)
    }

    /// Run on a dedicated worker thread, streaming progress over `progress`.
    pub fn spawn(
        self,
        progress: Sender<Progress>,
    ) -> SlidecastResult<JoinHandle<SlidecastResult<RenderReport>>> {
        std::thread::Builder::new()
            .name(format!("slidecast-{}", file_label(&self.out_path)))
            .spawn(move || self.run(&progress))
            .map_err(|e| SlidecastError::Other(anyhow::anyhow!("failed to spawn render thread: {e}")))
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "job".to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/session/job.rs"]
mod tests;
