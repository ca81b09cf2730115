use std::{fmt, str::FromStr};

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Concrete transition effect bound to a junction (and, through it, to a layer).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    None,
    Crossfade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    ZoomIn,
    #[serde(rename = "fadeinout")]
    FadeInOut,
}

impl EffectKind {
    /// The kinds `random` draws from: everything except `None`.
    pub const ANIMATED: [EffectKind; 7] = [
        EffectKind::Crossfade,
        EffectKind::SlideLeft,
        EffectKind::SlideRight,
        EffectKind::SlideUp,
        EffectKind::SlideDown,
        EffectKind::ZoomIn,
        EffectKind::FadeInOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Crossfade => "crossfade",
            Self::SlideLeft => "slide_left",
            Self::SlideRight => "slide_right",
            Self::SlideUp => "slide_up",
            Self::SlideDown => "slide_down",
            Self::ZoomIn => "zoom_in",
            Self::FadeInOut => "fadeinout",
        }
    }

    pub fn parse(name: &str) -> SlidecastResult<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            return Err(SlidecastError::effect_resolution(
                "transition kind must be non-empty",
            ));
        }

        match name.as_str() {
            "none" => Ok(Self::None),
            "crossfade" => Ok(Self::Crossfade),
            "slide_left" => Ok(Self::SlideLeft),
            "slide_right" => Ok(Self::SlideRight),
            "slide_up" => Ok(Self::SlideUp),
            "slide_down" => Ok(Self::SlideDown),
            "zoom_in" => Ok(Self::ZoomIn),
            "fadeinout" => Ok(Self::FadeInOut),
            other => Err(SlidecastError::effect_resolution(format!(
                "unknown transition kind '{other}'"
            ))),
        }
    }

    /// Kinds whose junction makes the outgoing layer stay active for the transition duration.
    pub fn is_overlapping(self) -> bool {
        matches!(
            self,
            Self::Crossfade | Self::SlideLeft | Self::SlideRight | Self::SlideUp | Self::SlideDown
        )
    }

    /// Kinds that animate a whole layer rather than the overlap window of a junction.
    pub fn is_per_layer(self) -> bool {
        matches!(self, Self::ZoomIn | Self::FadeInOut)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = SlidecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/kind.rs"]
mod tests;
