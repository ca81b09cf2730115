use rand::{SeedableRng, rngs::StdRng};

use crate::{
    effects::kind::EffectKind,
    foundation::{
        core::Canvas,
        error::{SlidecastError, SlidecastResult},
    },
    timeline::{layer::Layer, slide::Slide, spec::TransitionSpec},
};

/// Ordered layers for one composition request, plus the decisions that produced them.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    canvas: Canvas,
    slide_duration: f64,
    transition_duration: f64,
    junctions: Vec<EffectKind>,
    seed: u64,
    total_duration: f64,
    layers: Vec<Layer>,
}

impl Timeline {
    pub(crate) fn from_parts(
        canvas: Canvas,
        slide_duration: f64,
        transition_duration: f64,
        junctions: Vec<EffectKind>,
        seed: u64,
        layers: Vec<Layer>,
    ) -> Self {
        Self {
            canvas,
            slide_duration,
            transition_duration,
            junctions,
            seed,
            total_duration: (layers.len() as f64) * slide_duration,
            layers,
        }
    }

    /// Frame size: the first slide's natural dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn slide_duration(&self) -> f64 {
        self.slide_duration
    }

    pub fn transition_duration(&self) -> f64 {
        self.transition_duration
    }

    /// Resolved kind per junction (`len == layers().len() - 1`).
    pub fn junctions(&self) -> &[EffectKind] {
        &self.junctions
    }

    /// Seed the per-junction draws were made with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Layers in painter's order (slide order).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// `N * slide_duration`; the last layer never carries an overlap tail.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Builds a [`Timeline`] from an ordered slide list.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    slide_duration: f64,
    transitions: TransitionSpec,
    seed: Option<u64>,
}

impl TimelineBuilder {
    pub fn new(slide_duration: f64, transitions: TransitionSpec) -> Self {
        Self {
            slide_duration,
            transitions,
            seed: None,
        }
    }

    /// Fix the seed for randomized junction draws.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed_opt(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self, slides: &[Slide]) -> SlidecastResult<()> {
        if slides.is_empty() {
            return Err(SlidecastError::configuration(
                "slide list must be non-empty",
            ));
        }
        let s = self.slide_duration;
        if !s.is_finite() || s <= 0.0 {
            return Err(SlidecastError::configuration(format!(
                "slide duration must be finite and > 0 (got {s})"
            )));
        }
        let d = self.transitions.duration;
        if !d.is_finite() || d < 0.0 {
            return Err(SlidecastError::configuration(format!(
                "transition duration must be finite and >= 0 (got {d})"
            )));
        }
        if d >= s {
            return Err(SlidecastError::configuration(format!(
                "transition duration ({d}) must be < slide duration ({s})"
            )));
        }
        Ok(())
    }

    #[tracing::instrument(
        skip(self, slides),
        fields(slides = slides.len(), transition = %self.transitions.choice)
    )]
    pub fn build(&self, slides: Vec<Slide>) -> SlidecastResult<Timeline> {
        self.validate(&slides)?;
        let canvas = Canvas::new(slides[0].width, slides[0].height)?;

        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        if self.transitions.choice.is_randomized() {
            tracing::debug!(seed, "resolving randomized transitions");
        }
        let mut rng = StdRng::seed_from_u64(seed);

        let n = slides.len();
        let s = self.slide_duration;
        let d = self.transitions.duration;

        let junctions: Vec<EffectKind> = (0..n - 1)
            .map(|_| self.transitions.choice.resolve(&mut rng))
            .collect();
        for (i, kind) in junctions.iter().enumerate() {
            tracing::debug!(junction = i, effect = %kind, "resolved junction");
        }

        // Layer 0 has no junction before it; only per-layer kinds carry over to it.
        let lead_in = match junctions.first() {
            Some(kind) => *kind,
            None => self.transitions.choice.resolve(&mut rng),
        };

        let mut layers = Vec::with_capacity(n);
        for (i, slide) in slides.into_iter().enumerate() {
            let entrance = if i == 0 {
                if lead_in.is_per_layer() {
                    lead_in
                } else {
                    EffectKind::None
                }
            } else {
                junctions[i - 1]
            };

            let (exit, tail) = match junctions.get(i) {
                Some(kind) if kind.is_overlapping() => (*kind, d),
                Some(kind) => (*kind, 0.0),
                None if entrance == EffectKind::FadeInOut => (EffectKind::FadeInOut, 0.0),
                None => (EffectKind::None, 0.0),
            };

            let start_time = (i as f64) * s;
            let next_start = ((i + 1) as f64) * s;
            layers.push(Layer::new(
                i,
                slide,
                start_time,
                s + tail,
                next_start + tail,
                d,
                entrance,
                exit,
            ));
        }

        Ok(Timeline::from_parts(canvas, s, d, junctions, seed, layers))
    }
}

/// Build with a fresh random seed; see [`TimelineBuilder`].
pub fn build(
    slides: Vec<Slide>,
    slide_duration: f64,
    transitions: &TransitionSpec,
) -> SlidecastResult<Timeline> {
    TimelineBuilder::new(slide_duration, transitions.clone()).build(slides)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
