//! Persistence gateway
//!
//! The whole [`UserList`] graph is written to a single file and read back at
//! startup. Two encodings are supported:
//!
//! - [`DataFormat::Binary`]: bincode with the standard configuration (default)
//! - [`DataFormat::Json`]: pretty-printed JSON, useful for inspection
//!
//! A missing file is not an error; it loads as an empty user list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::model::UserList;

pub mod error;

pub use error::StoreError;
use error::Result;

/// On-disk encoding of the data file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    #[default]
    Binary,
    Json,
}

impl DataFormat {
    /// Infer the format from a file extension: `.json` is JSON, anything else binary
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Binary,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown data format '{other}' (expected binary or json)")),
        }
    }
}

/// Reads and writes the user list at a fixed path
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    format: DataFormat,
}

impl Store {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: DataFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Store whose format is inferred from the file extension
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = DataFormat::from_path(&path);
        Self { path, format }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> DataFormat {
        self.format
    }

    /// Write the whole graph, replacing the previous file
    ///
    /// Parent directories are created as needed. The in-memory list is never
    /// modified, so a failed save can simply be retried.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if encoding fails or the file cannot be written.
    pub fn save(&self, users: &UserList) -> Result<()> {
        let bytes = self.encode(users)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&self.path, &bytes).map_err(|e| StoreError::io(&self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            format = %self.format,
            users = users.len(),
            bytes = bytes.len(),
            "data saved"
        );
        Ok(())
    }

    /// Read the graph back; a missing file yields an empty list
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or decoded.
    pub fn load(&self) -> Result<UserList> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no data file, starting empty");
                return Ok(UserList::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        let users = self.decode(&bytes)?;
        tracing::info!(path = %self.path.display(), users = users.len(), "data loaded");
        Ok(users)
    }

    /// Like [`Store::load`], but any failure degrades to an empty list
    #[must_use]
    pub fn load_or_default(&self) -> UserList {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to load data, starting empty");
            UserList::new()
        })
    }

    fn encode(&self, users: &UserList) -> Result<Vec<u8>> {
        match self.format {
            DataFormat::Binary => Ok(bincode::serde::encode_to_vec(
                users,
                bincode::config::standard(),
            )?),
            DataFormat::Json => Ok(serde_json::to_vec_pretty(users)?),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<UserList> {
        match self.format {
            DataFormat::Binary => {
                let (users, read): (UserList, usize) =
                    bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
                if read != bytes.len() {
                    return Err(StoreError::Corrupt(format!(
                        "{} trailing bytes after snapshot",
                        bytes.len() - read
                    )));
                }
                Ok(users)
            }
            DataFormat::Json => Ok(serde_json::from_slice(bytes)?),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
