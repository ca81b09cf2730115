use crate::{
    effects::{
        kind::EffectKind,
        library::{LayerTransform, evaluate, fade_in_opacity, fade_out_opacity},
    },
    foundation::core::Canvas,
    timeline::slide::Slide,
};

/// A slide bound to absolute timing and its resolved effects.
///
/// Layers never reference each other: overlap is purely a property of their numeric windows.
/// The active window is `[start_time, window_end)`; `window_end` is anchored to the next
/// slide's cadence point so adjacent non-overlapping windows meet exactly.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Layer {
    index: usize,
    slide: Slide,
    start_time: f64,
    active_duration: f64,
    #[serde(skip)]
    window_end: f64,
    transition_duration: f64,
    entrance: EffectKind,
    exit: EffectKind,
}

impl Layer {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        slide: Slide,
        start_time: f64,
        active_duration: f64,
        window_end: f64,
        transition_duration: f64,
        entrance: EffectKind,
        exit: EffectKind,
    ) -> Self {
        Self {
            index,
            slide,
            start_time,
            active_duration,
            window_end,
            transition_duration,
            entrance,
            exit,
        }
    }

    /// Position in painter's order (0 is furthest back).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn active_duration(&self) -> f64 {
        self.active_duration
    }

    pub fn window_end(&self) -> f64 {
        self.window_end
    }

    /// Kind resolved for the junction before this layer (or the lead-in kind for layer 0).
    pub fn entrance(&self) -> EffectKind {
        self.entrance
    }

    /// Kind resolved for the junction after this layer.
    pub fn exit(&self) -> EffectKind {
        self.exit
    }

    pub fn is_active_at(&self, t: f64) -> bool {
        self.start_time <= t && t < self.window_end
    }

    /// Window the entrance effect is evaluated over.
    fn entrance_window(&self) -> f64 {
        if self.entrance.is_overlapping() {
            self.transition_duration
        } else {
            self.active_duration
        }
    }

    /// Evaluate this layer `elapsed` seconds after its start.
    ///
    /// The entrance transform comes first; a per-layer exit kind (fade-out or zoom) is folded in
    /// over the whole active window.
    pub fn transform_at(&self, elapsed: f64, canvas: Canvas) -> LayerTransform {
        let mut t = match self.entrance {
            EffectKind::FadeInOut => LayerTransform {
                opacity: fade_in_opacity(elapsed, self.active_duration),
                ..LayerTransform::IDENTITY
            },
            kind => evaluate(kind, elapsed, self.entrance_window(), canvas),
        };
        match self.exit {
            EffectKind::FadeInOut => t.opacity *= fade_out_opacity(elapsed, self.active_duration),
            // A zooming entrance already covers the whole window.
            EffectKind::ZoomIn if self.entrance != EffectKind::ZoomIn => {
                t.scale *= evaluate(EffectKind::ZoomIn, elapsed, self.active_duration, canvas).scale;
            }
            _ => {}
        }
        t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/layer.rs"]
mod tests;
