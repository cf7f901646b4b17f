//! Configuration module for photos
//!
//! Manages where the data file lives, its encoding, output verbosity, the
//! remembered login and the bundled stock images. Configuration is stored in
//! the user's config directory; `PHOTOS_*` environment variables override
//! values from the file.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::store::{DataFormat, Store};

/// Default data file name inside the application data directory
pub const DATA_FILE_NAME: &str = "photos_app_data.dat";

/// Number of bundled stock images
pub const STOCK_PHOTO_COUNT: usize = 5;

/// Keys accepted by `config get` / `config set`
pub const SETTABLE_KEYS: [&str; 3] = ["quiet", "format", "data_file"];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PhotosConfig {
    /// Location of the data file; defaults to the system data directory
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Encoding of the data file; inferred from its extension when unset
    #[serde(default)]
    pub format: Option<DataFormat>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// User remembered by `login`
    #[serde(default)]
    pub current_user: Option<String>,

    /// Stock images seeded on first run
    #[serde(default)]
    pub stock_photos: Vec<PathBuf>,
}

impl PhotosConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("photos").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, with environment overrides
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("PHOTOS"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file
    ///
    /// # Errors
    ///
    /// Same as [`PhotosConfig::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// The wizard only runs on an interactive terminal; otherwise the defaults
    /// are written and used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() || !std::io::stdin().is_terminal() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Resolved data file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(default_data_dir()?.join(DATA_FILE_NAME)),
        }
    }

    /// Encoding for `path`: the configured format, else inferred from the extension
    #[must_use]
    pub fn data_format(&self, path: &Path) -> DataFormat {
        self.format.unwrap_or_else(|| DataFormat::from_path(path))
    }

    /// Persistence gateway for the configured data file, or for `data_override`
    ///
    /// # Errors
    ///
    /// See [`PhotosConfig::data_file`].
    pub fn store(&self, data_override: Option<&Path>) -> Result<Store, ConfigError> {
        let path = match data_override {
            Some(path) => path.to_path_buf(),
            None => self.data_file()?,
        };
        let format = self.data_format(&path);
        Ok(Store::new(path, format))
    }

    /// Stock image paths: the configured list, else `stock1.jpg`..`stock5.jpg`
    /// in the application data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn stock_photo_paths(&self) -> Result<Vec<PathBuf>, ConfigError> {
        if !self.stock_photos.is_empty() {
            return Ok(self.stock_photos.clone());
        }
        let stock_dir = default_data_dir()?.join("stock");
        Ok((1..=STOCK_PHOTO_COUNT)
            .map(|i| stock_dir.join(format!("stock{i}.jpg")))
            .collect())
    }

    /// Read a settable key as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "quiet" => Ok(self.quiet.to_string()),
            "format" => Ok(self
                .format
                .map_or_else(|| "auto".to_string(), |f| f.to_string())),
            "data_file" => Ok(self.data_file()?.display().to_string()),
            other => Err(ConfigError::NotFound(other.to_string())),
        }
    }

    /// Update a settable key from text; the caller saves
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "quiet" => {
                self.quiet = value
                    .parse()
                    .map_err(|_| ConfigError::Message(format!("Expected true or false, got '{value}'")))?;
            }
            "format" => {
                self.format = if value.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    Some(value.parse().map_err(ConfigError::Message)?)
                };
            }
            "data_file" => {
                if value.is_empty() {
                    return Err(ConfigError::Message("data_file cannot be empty".to_string()));
                }
                self.data_file = Some(PathBuf::from(value));
            }
            other => {
                return Err(ConfigError::Message(format!(
                    "Unknown key '{other}' (expected one of: {})",
                    SETTABLE_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::data_local_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?
        .join("photos"))
}
