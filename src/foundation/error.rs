/// Convenience result type used across Vitrine.
pub type VitrineResult<T> = Result<T, VitrineError>;

/// Top-level error taxonomy used by the motion core and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    /// Invalid configuration or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or validating timelines and easing curves.
    #[error("animation error: {0}")]
    Animation(String),

    /// The contact relay rejected or failed to deliver a submission.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Ambient playback was blocked by the platform's autoplay policy.
    #[error("autoplay denied: {0}")]
    AutoplayDenied(String),

    /// The audio synthesis backend is missing or failed.
    #[error("audio unavailable: {0}")]
    AudioUnavailable(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// Build a [`VitrineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VitrineError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`VitrineError::TransportFailure`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportFailure(msg.into())
    }

    /// Build a [`VitrineError::AutoplayDenied`] value.
    pub fn autoplay_denied(msg: impl Into<String>) -> Self {
        Self::AutoplayDenied(msg.into())
    }

    /// Build a [`VitrineError::AudioUnavailable`] value.
    pub fn audio_unavailable(msg: impl Into<String>) -> Self {
        Self::AudioUnavailable(msg.into())
    }

    /// Build a [`VitrineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
