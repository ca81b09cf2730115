use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::Fps,
        error::{SlidecastError, SlidecastResult},
    },
    timeline::{builder::TimelineBuilder, spec::TransitionSpec},
};

/// Margin kept between the transition and slide durations by the caller-side clamp.
pub const TRANSITION_EPSILON_SECS: f64 = 0.1;

pub const DEFAULT_FPS: u32 = 24;

/// Per-request slideshow settings, as accepted from JSON or the command line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideshowConfig {
    /// Seconds each slide is shown.
    pub slide_duration: f64,
    /// A kind name, a comma-separated list of kind names, or `random`.
    #[serde(default = "default_transition")]
    pub transition: String,
    /// Requested overlap in seconds; clamped below `slide_duration` before building.
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f64,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_transition() -> String {
    "none".to_string()
}

fn default_transition_duration() -> f64 {
    1.0
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

impl SlideshowConfig {
    pub fn new(slide_duration: f64) -> Self {
        Self {
            slide_duration,
            transition: default_transition(),
            transition_duration: default_transition_duration(),
            fps: default_fps(),
            seed: None,
        }
    }

    pub fn from_json_str(s: &str) -> SlidecastResult<Self> {
        serde_json::from_str(s).map_err(|e| SlidecastError::serde(e.to_string()))
    }

    pub fn from_path(path: &Path) -> SlidecastResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open slideshow config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SlidecastError::serde(format!("parse slideshow config '{}': {e}", path.display()))
        })
    }

    pub fn validate(&self) -> SlidecastResult<()> {
        let s = self.slide_duration;
        if !s.is_finite() || s <= 0.0 {
            return Err(SlidecastError::configuration(format!(
                "slide_duration must be finite and > 0 (got {s})"
            )));
        }
        let d = self.transition_duration;
        if !d.is_finite() || d < 0.0 {
            return Err(SlidecastError::configuration(format!(
                "transition_duration must be finite and >= 0 (got {d})"
            )));
        }
        if self.fps == 0 {
            return Err(SlidecastError::configuration("fps must be > 0"));
        }
        Ok(())
    }

    /// `max(0, min(requested, slide_duration - epsilon))`.
    pub fn safe_transition_duration(&self) -> f64 {
        self.transition_duration
            .min(self.slide_duration - TRANSITION_EPSILON_SECS)
            .max(0.0)
    }

    pub fn fps(&self) -> SlidecastResult<Fps> {
        Fps::integer(self.fps)
    }

    pub fn transition_spec(&self) -> SlidecastResult<TransitionSpec> {
        let safe = self.safe_transition_duration();
        if safe != self.transition_duration {
            tracing::warn!(
                requested = self.transition_duration,
                clamped = safe,
                slide_duration = self.slide_duration,
                "transition duration clamped below slide duration"
            );
        }
        TransitionSpec::parse(&self.transition, safe)
    }

    pub fn timeline_builder(&self) -> SlidecastResult<TimelineBuilder> {
        self.validate()?;
        Ok(TimelineBuilder::new(self.slide_duration, self.transition_spec()?).seed_opt(self.seed))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
