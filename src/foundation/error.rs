pub type SlidecastResult<T> = Result<T, SlidecastError>;

#[derive(thiserror::Error, Debug)]
pub enum SlidecastError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("effect resolution error: {0}")]
    EffectResolution(String),

    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlidecastError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn effect_resolution(msg: impl Into<String>) -> Self {
        Self::EffectResolution(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalConsistency(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the failure came from a broken Builder/Compositor invariant.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InternalConsistency(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
