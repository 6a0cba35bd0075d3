//! Error types for film processing.

use thiserror::Error;

/// Error type for film processing.
#[derive(Error, Debug)]
pub enum FilmError {
    /// Reading or writing a settings or action file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings or action file is not valid YAML for its type.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No filter is registered for an action identifier.
    #[error("unknown filter action: {0}")]
    UnknownAction(String),

    /// A tone operation failed.
    #[error(transparent)]
    Ops(#[from] filmneg_ops::OpsError),

    /// Pixel buffer error.
    #[error(transparent)]
    Core(#[from] filmneg_core::Error),
}

/// Result type for film processing.
pub type FilmResult<T> = Result<T, FilmError>;
