use thiserror::Error;

/// Failures surfaced by a [`crate::ValidatorStore`] backend. Every variant is
/// fatal to the caller: validator state can no longer be trusted.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing store metadata: {0}")]
    MissingMeta(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("record encoding error: {0}")]
    Serialization(String),

    /// The backend refused a write batch; none of its ops were applied.
    #[error("write batch rejected: {0}")]
    BatchRejected(String),
}
