//! Error types for FLARE.

use thiserror::Error;

/// Result type alias for FLARE operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in FLARE operations.
#[derive(Error, Debug)]
pub enum Error {
    // Aggregation errors
    #[error("cannot aggregate an empty round")]
    EmptyRound,

    #[error("shape mismatch for participant {participant} at layer {layer}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        participant: String,
        layer: usize,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("invalid contribution from participant {participant}: data size {size} must be positive")]
    InvalidContribution { participant: String, size: u64 },

    // Codec errors
    #[error("malformed update: {0}")]
    MalformedUpdate(String),

    // Persistence errors
    #[error("persistence failed: {0}")]
    Persistence(String),

    // Dataset errors
    #[error("dataset error: {0}")]
    Dataset(String),

    // Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    // Generic errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
