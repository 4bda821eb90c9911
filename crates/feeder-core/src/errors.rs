use thiserror::Error;

#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(pub String);

/// Failure surfaced by the portrait cache once stale fallback is exhausted.
#[derive(Debug, Error)]
pub enum PortraitError {
    /// No bytes were ever cached and the image service did not answer.
    #[error("portrait unavailable for character {subject_id}")]
    Unavailable { subject_id: i64 },

    #[error("portrait store error: {0:#}")]
    Store(#[source] anyhow::Error),
}

impl PortraitError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, PortraitError::Unavailable { .. })
    }
}
