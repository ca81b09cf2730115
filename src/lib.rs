//! Slidecast turns an ordered list of still images into a slideshow video.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `Vec<Slide> + TransitionSpec -> Timeline` (one layer per slide, transitions
//!    resolved per junction, seed recorded)
//! 2. **Composite**: `Timeline + t -> FrameRGBA` (active layers blended over opaque black)
//! 3. **Encode**: stream every frame in order into a [`FrameSink`], usually the system `ffmpeg`
//!    binary producing a silent H.264 MP4
//!
//! Frames are pure functions of the timeline and the timestamp, so rendering is restartable and
//! can run in parallel. Pixels are premultiplied RGBA8 end-to-end.
#![forbid(unsafe_code)]

mod assets;
mod effects;
mod encode;
mod foundation;
mod render;
mod session;
mod timeline;

pub use assets::decode::{PreparedImage, decode_image, decode_image_file, expand_image_inputs};
pub use effects::kind::EffectKind;
pub use effects::library::{
    FADE_SECS, LayerTransform, ZOOM_END_SCALE, evaluate, fade_in_opacity, fade_out_opacity,
    progress,
};
pub use encode::ffmpeg::{
    EncodeConfig, FfmpegEncoder, FfmpegSink, default_mp4_config, ensure_parent_dir,
    is_ffmpeg_on_path,
};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use render::blend::{OPAQUE_BLACK, PremulRgba8, over};
pub use render::compositor::{ActiveLayer, Compositor, Frames};
pub use render::frame::FrameRGBA;
pub use render::pipeline::{
    NoProgress, Progress, ProgressFn, ProgressSink, RenderStats, RenderThreading, render_to_sink,
};
pub use session::config::{DEFAULT_FPS, SlideshowConfig, TRANSITION_EPSILON_SECS};
pub use session::job::{RenderReport, SlideshowJob, load_slides, plan};
pub use timeline::builder::{Timeline, TimelineBuilder, build};
pub use timeline::layer::Layer;
pub use timeline::slide::Slide;
pub use timeline::spec::{TransitionChoice, TransitionSpec};
