//! Config command - read and change settings

use crate::cli::ConfigCommands;
use crate::config::PhotosConfig;
use crate::{PhotosError, Result, output};

/// Execute the config command against `config`, saving on `set`
///
/// # Errors
/// Returns `InvalidInput` for malformed settings, or a config error for
/// unknown keys, bad values and failed saves
pub fn execute(config: &mut PhotosConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                PhotosError::InvalidInput("Invalid format. Use: photos config set key=value".into())
            })?;
            let key = key.trim();
            config.set(key, value)?;
            config.save()?;
            output::success(&format!("Set {key} = {}", config.get(key)?), quiet);
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get(key.trim())?);
        }
    }
    Ok(())
}
