//! Persistence error types
//!
//! # Error Types
//!
//! - **`Io`**: the data file or its directory could not be read or written
//! - **`Encode`** / **`Decode`**: bincode could not serialize or deserialize the user list
//! - **`Json`**: `serde_json` failed in either direction
//! - **`Corrupt`**: the file decoded but had bytes left over

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while saving or loading the data file
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a filesystem error on the data file
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Represents a JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file decoded but is not a single well-formed snapshot
    #[error("Corrupt data file: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, StoreError>;
