/// Convenience result type used across the crate.
pub type CapsuleResult<T> = Result<T, CapsuleError>;

/// Top-level error taxonomy used by capsule, codec, render and bridge APIs.
#[derive(thiserror::Error, Debug)]
pub enum CapsuleError {
    /// An invalid handle, value or capsule was passed where a valid one is required.
    #[error("argument error: {0}")]
    Argument(String),

    /// Open/read/write/allocate failures, including accumulated low-level failures.
    #[error("io error: {0}")]
    Io(String),

    /// Texture, surface or pixel-buffer creation failed in a rendering collaborator.
    #[error("resource error: {0}")]
    Resource(String),

    /// Wrapped lower-level error from dependencies (image codec, temporary files).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CapsuleError {
    /// Build a [`CapsuleError::Argument`] value.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Build a [`CapsuleError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`CapsuleError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
