//! Error types for showtrack-core

use thiserror::Error;

/// Result type alias using showtrack-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in showtrack-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cloud settings could not be read or written
    #[error("Settings error: {0}")]
    Settings(String),
}
