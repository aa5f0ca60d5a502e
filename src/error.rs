//! Error types shared by the whole crate.

use thiserror::Error;

/// Everything that can go wrong while building training pairs or filtering
/// projection data.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid number of splits, unknown strategy, splits of unequal lengths,
    /// unreadable configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Flat index outside `[0, len)`.
    #[error("Index {index} out of range for length {len}")]
    Index { index: usize, len: usize },

    /// Array of the wrong rank or size.
    #[error("Shape error: expected {expected}, got shape {actual:?}")]
    Shape { expected: String, actual: Vec<usize> },

    /// Raised by an external projector, passed through untouched.
    #[error("Projector failed: {0}")]
    Operator(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn shape(expected: impl Into<String>, actual: &[usize]) -> Self {
        Self::Shape { expected: expected.into(), actual: actual.to_vec() }
    }
}
