//! Domain error types
//!
//! Every mutation on the in-memory model reports failure synchronously through
//! [`ModelError`]. None of these conditions are fatal: the caller decides whether
//! to show the message, retry with different input, or give up.
//!
//! # Error Types
//!
//! - **`AlreadyExists`**: duplicate username, album name, photo within an album, or tag type
//! - **`NotFound`**: the named user, album, photo, or tag type does not exist
//! - **`InvalidOperation`**: protected stock album, multiplicity violations, empty names
//! - **`DuplicateTag`**: an equal tag is already attached to the photo
//! - **`PhotoUnreadable`**: the file backing a new photo could not be inspected

use std::fmt;
use thiserror::Error;

/// The kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Album,
    Photo,
    TagType,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::User => "User",
            Self::Album => "Album",
            Self::Photo => "Photo",
            Self::TagType => "Tag type",
        };
        f.write_str(name)
    }
}

/// Errors raised by model operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// The name or key is already taken
    #[error("{entity} '{name}' already exists")]
    AlreadyExists { entity: Entity, name: String },

    /// The name or key does not exist
    #[error("{entity} '{name}' not found")]
    NotFound { entity: Entity, name: String },

    /// The operation is not allowed in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// An equal tag is already attached to the photo
    #[error("'{0}' tag already exists")]
    DuplicateTag(String),

    /// The photo file could not be inspected for its timestamp
    #[error("Cannot read photo '{path}': {source}")]
    PhotoUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    pub(crate) fn already_exists(entity: Entity, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            name: name.into(),
        }
    }

    pub(crate) fn not_found(entity: Entity, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
