//! Photos - a single-machine photo organizer
//!
//! Users own albums of photos, attach typed tags (location, people, ...) to
//! them, search by tag or capture date and run slideshows. The whole user
//! graph lives in memory and is saved to one data file.

use thiserror::Error;

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod model;
pub mod output;
pub mod session;
pub mod slideshow;
pub mod store;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PhotosError {
    /// Model rule violation (duplicate, missing entity, stock guard, ...)
    #[error(transparent)]
    Model(#[from] model::ModelError),
    /// Saving or loading the data file failed
    #[error("Persistence failure: {0}")]
    Store(#[from] store::StoreError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The current session may not perform this action
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, PhotosError>;
