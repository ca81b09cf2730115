//! Pure, stateless transform evaluation for every [`EffectKind`].
//!
//! Every ramp is linear in time and clamps outside its window: `elapsed < 0` yields the start
//! value and `elapsed > window` yields the end value.

use crate::{
    effects::kind::EffectKind,
    foundation::core::{Canvas, Vec2},
};

/// Scale reached by [`EffectKind::ZoomIn`] at the end of a layer's active window.
pub const ZOOM_END_SCALE: f64 = 1.15;

/// Length of each half of a [`EffectKind::FadeInOut`] dip to black.
pub const FADE_SECS: f64 = 0.5;

/// Opacity, translation (pixels) and uniform scale applied to one layer at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LayerTransform {
    pub opacity: f64,
    pub offset: Vec2,
    pub scale: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LayerTransform {
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn with_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            ..Self::IDENTITY
        }
    }

    fn with_offset(offset: Vec2) -> Self {
        Self {
            offset,
            ..Self::IDENTITY
        }
    }

    fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }
}

/// Evaluate `kind` at `elapsed` seconds into a window of `window` seconds.
///
/// The window is the transition duration for `Crossfade`/`Slide*` and the layer's whole active
/// duration for `ZoomIn`/`FadeInOut`.
pub fn evaluate(kind: EffectKind, elapsed: f64, window: f64, canvas: Canvas) -> LayerTransform {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);

    match kind {
        EffectKind::None => LayerTransform::IDENTITY,
        EffectKind::Crossfade => LayerTransform::with_opacity(progress(elapsed, window)),
        EffectKind::SlideLeft => slide_from(Vec2::new(w, 0.0), elapsed, window),
        EffectKind::SlideRight => slide_from(Vec2::new(-w, 0.0), elapsed, window),
        EffectKind::SlideUp => slide_from(Vec2::new(0.0, h), elapsed, window),
        EffectKind::SlideDown => slide_from(Vec2::new(0.0, -h), elapsed, window),
        EffectKind::ZoomIn => {
            LayerTransform::with_scale(lerp(1.0, ZOOM_END_SCALE, progress(elapsed, window)))
        }
        EffectKind::FadeInOut => LayerTransform::with_opacity(
            fade_in_opacity(elapsed, window) * fade_out_opacity(elapsed, window),
        ),
    }
}

/// Opacity of the leading half of a dip to black over an active window.
pub fn fade_in_opacity(elapsed: f64, window: f64) -> f64 {
    progress(elapsed, fade_secs(window))
}

/// Opacity of the trailing half of a dip to black over an active window.
pub fn fade_out_opacity(elapsed: f64, window: f64) -> f64 {
    progress(window - elapsed, fade_secs(window))
}

fn fade_secs(window: f64) -> f64 {
    FADE_SECS.min(window.max(0.0) / 2.0)
}

fn slide_from(start: Vec2, elapsed: f64, window: f64) -> LayerTransform {
    LayerTransform::with_offset(start * (1.0 - progress(elapsed, window)))
}

/// Linear 0..1 progress through `window`, clamped at both ends.
///
/// A zero-length window is a step at `elapsed == 0`.
pub fn progress(elapsed: f64, window: f64) -> f64 {
    if elapsed.is_nan() || elapsed <= 0.0 {
        return if window > 0.0 || elapsed < 0.0 { 0.0 } else { 1.0 };
    }
    if !(window > 0.0) || elapsed >= window {
        return 1.0;
    }
    elapsed / window
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/effects/library.rs"]
mod tests;
