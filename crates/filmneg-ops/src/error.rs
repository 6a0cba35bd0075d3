//! Error types for tone operations.

use thiserror::Error;

/// Error type for tone operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Buffers have incompatible sizes or depths.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// A filter action doesn't belong to the filter reading it.
    #[error("action mismatch: expected {expected}, got {got}")]
    ActionMismatch {
        /// Identifier the filter understands
        expected: String,
        /// Identifier found in the action
        got: String,
    },

    /// The worker thread running a filter panicked.
    #[error("filter worker panicked")]
    WorkerPanicked,

    /// Pixel buffer error.
    #[error(transparent)]
    Core(#[from] filmneg_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::ActionMismatch`] error.
    pub fn action_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::ActionMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Result type for tone operations.
pub type OpsResult<T> = Result<T, OpsError>;
