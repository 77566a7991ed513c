// Configuration file loading and creation

use super::types::Config;
use crate::error::ConfigLoadError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stickminton");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Parse and validate configuration text
pub fn parse_config(contents: &str) -> Result<Config, ConfigLoadError> {
    let config: Config = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from file, or create default if it doesn't exist
///
/// A file that fails to parse or validate is reported and replaced by the
/// defaults for this run; it is left on disk untouched.
pub fn load_config() -> Result<Config, ConfigLoadError> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigLoadError> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path)?;
        match parse_config(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to load config file {}: {}", config_path.display(), e);
                warn!("Using default configuration");
                Ok(Config::default())
            }
        }
    } else {
        create_default_config(config_path)?;
        Ok(Config::default())
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), ConfigLoadError> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config)?;

    let commented_toml = format!(
        "# Stickminton Configuration File\n\
         # Settings are read once when a match is created\n\
         #\n\
         # [match]   target_points, sets_to_win, pause lengths in ticks (60 per second)\n\
         # [ai]      difficulty: \"easy\", \"medium\", \"hard\"\n\
         # [physics] court constants in units per tick\n\
         # seed      RNG seed; the same seed replays the same match for the same inputs\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!("Created default config file at: {}", path.display());
    Ok(())
}
