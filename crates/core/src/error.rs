//! Error types for the pick aggregation pipeline.
//!
//! Shape problems in the feed never surface here: they degrade to empty
//! values inside the component that meets them. What remains is
//! configuration misuse, unusable input at the edges, and I/O.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pick aggregation pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (input of the wrong JSON shape at an API edge).
    #[error("Data error: {0}")]
    Data(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }
}
