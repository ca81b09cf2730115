use std::fmt;

use rand::Rng;

use crate::{
    effects::kind::EffectKind,
    foundation::error::{SlidecastError, SlidecastResult},
};

/// How each junction's effect is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionChoice {
    /// The same kind at every junction.
    Fixed(EffectKind),
    /// One independent uniform draw from the list per junction.
    OneOf(Vec<EffectKind>),
    /// One independent uniform draw from [`EffectKind::ANIMATED`] per junction.
    Random,
}

impl TransitionChoice {
    /// Parse `"crossfade"`, `"slide_left,zoom_in"` or `"random"`.
    pub fn parse(s: &str) -> SlidecastResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        if !trimmed.contains(',') {
            return Ok(Self::Fixed(EffectKind::parse(trimmed)?));
        }

        let mut kinds = Vec::new();
        for (i, part) in trimmed.split(',').enumerate() {
            if part.trim().is_empty() {
                return Err(SlidecastError::effect_resolution(format!(
                    "transition list entry {i} is empty in '{trimmed}'"
                )));
            }
            if part.trim().eq_ignore_ascii_case("random") {
                return Err(SlidecastError::effect_resolution(
                    "'random' cannot be combined with other transition kinds",
                ));
            }
            kinds.push(EffectKind::parse(part)?);
        }
        Ok(Self::OneOf(kinds))
    }

    /// Draw one concrete kind. `Fixed` never touches the RNG.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> EffectKind {
        match self {
            Self::Fixed(kind) => *kind,
            Self::OneOf(kinds) => match kinds.len() {
                0 => EffectKind::None,
                1 => kinds[0],
                n => kinds[rng.random_range(0..n)],
            },
            Self::Random => EffectKind::ANIMATED[rng.random_range(0..EffectKind::ANIMATED.len())],
        }
    }

    pub fn is_randomized(&self) -> bool {
        match self {
            Self::Fixed(_) => false,
            Self::OneOf(kinds) => kinds.len() > 1,
            Self::Random => true,
        }
    }
}

impl fmt::Display for TransitionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(kind) => write!(f, "{kind}"),
            Self::OneOf(kinds) => {
                for (i, kind) in kinds.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{kind}")?;
                }
                Ok(())
            }
            Self::Random => f.write_str("random"),
        }
    }
}

/// User-facing transition configuration: the per-junction choice plus one overlap duration.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSpec {
    pub choice: TransitionChoice,
    /// Seconds; applies to every overlapping junction.
    pub duration: f64,
}

impl TransitionSpec {
    pub fn new(choice: TransitionChoice, duration: f64) -> Self {
        Self { choice, duration }
    }

    pub fn parse(choice: &str, duration: f64) -> SlidecastResult<Self> {
        Ok(Self::new(TransitionChoice::parse(choice)?, duration))
    }

    pub fn fixed(kind: EffectKind, duration: f64) -> Self {
        Self::new(TransitionChoice::Fixed(kind), duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/spec.rs"]
mod tests;
