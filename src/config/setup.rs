//! Interactive setup wizard for first-time configuration
//!
//! This module handles the interactive prompts for creating an initial
//! configuration when photos is run for the first time.

use super::{DATA_FILE_NAME, PhotosConfig, default_data_dir};
use crate::store::DataFormat;
use config::ConfigError;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::PathBuf;

/// Interactive first-time setup - prompts for data file location and format
///
/// 1. Prompts for the data file location (default: system data directory)
/// 2. Prompts for the encoding (binary, or JSON for hand inspection)
/// 3. Creates and saves the configuration
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The system data directory cannot be determined
/// - User input cannot be read
/// - The configuration cannot be saved
pub fn first_time_setup() -> Result<PhotosConfig, ConfigError> {
    println!("Welcome to photos! Let's decide where your library is kept.\n");

    let theme = ColorfulTheme::default();

    let formats = [DataFormat::Binary, DataFormat::Json];
    let choice = Select::with_theme(&theme)
        .with_prompt("Data file format")
        .items(&formats)
        .default(0)
        .interact()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;
    let format = formats[choice];

    let default_path = default_data_dir()?.join(default_file_name(format));
    let data_path: String = Input::with_theme(&theme)
        .with_prompt("Data file location")
        .default(default_path.to_string_lossy().to_string())
        .interact_text()
        .map_err(|e| ConfigError::Message(format!("Failed to read input: {e}")))?;

    let config = PhotosConfig {
        data_file: Some(PathBuf::from(data_path)),
        format: Some(format),
        ..PhotosConfig::default()
    };

    config.save()?;

    println!("\nConfiguration saved successfully!");
    Ok(config)
}

fn default_file_name(format: DataFormat) -> String {
    match format {
        DataFormat::Binary => DATA_FILE_NAME.to_string(),
        DataFormat::Json => DATA_FILE_NAME.replace(".dat", ".json"),
    }
}
