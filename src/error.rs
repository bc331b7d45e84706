//! Error types for the tabscribe library

use std::io;

/// Library error type for tabscribe operations
#[derive(Debug, thiserror::Error)]
pub enum TabError {
    /// An index-addressed section or measure does not exist
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Export format outside the supported set
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The platform cannot present a share surface
    #[error("sharing unavailable: {0}")]
    SharingUnavailable(String),

    /// Gateway load/save failure, non-fatal for the library index
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    /// Parsing error when reading an exported document
    #[error("parsing error: {0}")]
    ParsingError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for TabError {
    fn from(error: io::Error) -> Self {
        Self::IoError(error.to_string())
    }
}
