use crate::{
    effects::library::LayerTransform,
    foundation::{
        core::{Affine, Canvas, Fps, FrameIndex, Point, Vec2},
        error::{SlidecastError, SlidecastResult},
    },
    render::{
        blend::{OPAQUE_BLACK, over},
        frame::FrameRGBA,
    },
    timeline::{builder::Timeline, layer::Layer},
};

/// With `transition_duration < slide_duration` at most two adjacent windows overlap.
const MAX_ACTIVE_LAYERS: usize = 2;

/// A layer selected for one timestamp, with its evaluated transform.
#[derive(Clone, Copy, Debug)]
pub struct ActiveLayer<'a> {
    pub layer: &'a Layer,
    pub elapsed: f64,
    pub transform: LayerTransform,
}

/// Turns a [`Timeline`] into frames at a fixed rate.
///
/// Every frame is a pure function of `(timeline, t)`, so frames can be rendered in any order,
/// in parallel, or again after a failed encode.
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'a> {
    timeline: &'a Timeline,
    fps: Fps,
    frame_count: u64,
}

impl<'a> Compositor<'a> {
    pub fn new(timeline: &'a Timeline, fps: Fps) -> SlidecastResult<Self> {
        let fps = Fps::new(fps.num, fps.den)?;
        if timeline.is_empty() {
            return Err(SlidecastError::configuration(
                "cannot composite an empty timeline",
            ));
        }
        Ok(Self {
            timeline,
            fps,
            frame_count: fps.secs_to_frames_floor(timeline.total_duration()),
        })
    }

    pub fn timeline(&self) -> &'a Timeline {
        self.timeline
    }

    pub fn canvas(&self) -> Canvas {
        self.timeline.canvas()
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// `floor(T * F)`.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn time_of(&self, frame: FrameIndex) -> f64 {
        self.fps.frame_to_secs(frame)
    }

    fn check_frame(&self, frame: FrameIndex) -> SlidecastResult<()> {
        if frame.0 >= self.frame_count {
            return Err(SlidecastError::configuration(format!(
                "frame {} is out of bounds (frame count {})",
                frame.0, self.frame_count
            )));
        }
        Ok(())
    }

    /// Active layers at frame `frame`, in painter's order.
    pub fn active_layers(&self, frame: FrameIndex) -> SlidecastResult<Vec<ActiveLayer<'a>>> {
        self.check_frame(frame)?;
        self.active_layers_at(self.time_of(frame))
    }

    /// Active layers at an arbitrary timestamp inside `[0, total_duration)`.
    pub fn active_layers_at(&self, t: f64) -> SlidecastResult<Vec<ActiveLayer<'a>>> {
        if !(t >= 0.0 && t < self.timeline.total_duration()) {
            return Err(SlidecastError::configuration(format!(
                "time {t}s is outside the timeline [0, {})",
                self.timeline.total_duration()
            )));
        }

        let canvas = self.canvas();
        let active: Vec<ActiveLayer<'a>> = self
            .timeline
            .layers()
            .iter()
            .filter(|layer| layer.is_active_at(t))
            .map(|layer| {
                let elapsed = t - layer.start_time();
                ActiveLayer {
                    layer,
                    elapsed,
                    transform: layer.transform_at(elapsed, canvas),
                }
            })
            .collect();

        if active.is_empty() {
            return Err(SlidecastError::internal(format!(
                "no active layer at t={t}s"
            )));
        }
        if active.len() > MAX_ACTIVE_LAYERS {
            return Err(SlidecastError::internal(format!(
                "{} layers active at t={t}s (at most {MAX_ACTIVE_LAYERS} expected)",
                active.len()
            )));
        }
        Ok(active)
    }

    pub fn render_frame(&self, frame: FrameIndex) -> SlidecastResult<FrameRGBA> {
        let active = self.active_layers(frame)?;
        Ok(self.blend(&active))
    }

    pub fn render_at(&self, t: f64) -> SlidecastResult<FrameRGBA> {
        let active = self.active_layers_at(t)?;
        Ok(self.blend(&active))
    }

    /// Back-to-front "over" of `active` onto opaque black.
    fn blend(&self, active: &[ActiveLayer<'_>]) -> FrameRGBA {
        let mut out = FrameRGBA::filled(self.canvas(), OPAQUE_BLACK);
        for a in active {
            draw_layer(&mut out, a);
        }
        out
    }

    pub fn frames(&self) -> Frames<'a> {
        self.frames_from(FrameIndex(0))
    }

    /// Lazy frames starting at `start`, e.g. to resume after a failed encode.
    pub fn frames_from(&self, start: FrameIndex) -> Frames<'a> {
        Frames {
            compositor: *self,
            next: start.0.min(self.frame_count),
        }
    }
}

/// Maps image space to canvas space: centre the image, scale about the canvas centre, then
/// translate by the layer offset.
fn placement(canvas: Canvas, image_w: u32, image_h: u32, t: &LayerTransform) -> Affine {
    let image_center = Vec2::new(f64::from(image_w) / 2.0, f64::from(image_h) / 2.0);
    Affine::translate(canvas.center() + t.offset)
        * Affine::scale(t.scale)
        * Affine::translate(-image_center)
}

fn draw_layer(out: &mut FrameRGBA, active: &ActiveLayer<'_>) {
    let t = &active.transform;
    if t.opacity <= 0.0 || t.scale <= 0.0 {
        return;
    }

    let image = active.layer.slide().image();
    let canvas = out.canvas();
    let fwd = placement(canvas, image.width, image.height, t);
    let inv = fwd.inverse();

    let bbox = fwd.transform_rect_bbox(kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    ));
    let x0 = bbox.x0.floor().max(0.0) as u32;
    let y0 = bbox.y0.floor().max(0.0) as u32;
    let x1 = (bbox.x1.ceil().max(0.0) as u32).min(canvas.width);
    let y1 = (bbox.y1.ceil().max(0.0) as u32).min(canvas.height);

    let opacity = t.opacity as f32;
    for y in y0..y1 {
        for x in x0..x1 {
            let src = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let (sx, sy) = (src.x.floor(), src.y.floor());
            if sx < 0.0 || sy < 0.0 || sx >= f64::from(image.width) || sy >= f64::from(image.height)
            {
                continue;
            }
            let px = image.pixel(sx as u32, sy as u32);
            let i = out.offset(x, y);
            let dst = [out.data[i], out.data[i + 1], out.data[i + 2], out.data[i + 3]];
            out.data[i..i + 4].copy_from_slice(&over(dst, px, opacity));
        }
    }
}

/// Restartable, lazily evaluated frame sequence.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    compositor: Compositor<'a>,
    next: u64,
}

impl Iterator for Frames<'_> {
    type Item = SlidecastResult<(FrameIndex, FrameRGBA)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.compositor.frame_count {
            return None;
        }
        let idx = FrameIndex(self.next);
        self.next += 1;
        Some(self.compositor.render_frame(idx).map(|f| (idx, f)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.compositor.frame_count.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
