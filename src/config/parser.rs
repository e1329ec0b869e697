use crate::config::types::Settings;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// Every section and key is optional; missing values take their defaults.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    validate(&settings)?;
    Ok(settings)
}

/// Loads the file when one is given, otherwise validates and returns defaults
pub fn load_settings_or_default(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => {
            let settings = Settings::default();
            validate(&settings)?;
            Ok(settings)
        }
    }
}

/// Re-validates settings after command-line overrides were applied
pub fn revalidate(settings: &Settings) -> Result<(), ConfigError> {
    validate(settings)
}

/// Loads a `.env` file into the process environment
///
/// With no path, `.env` is searched for in the working directory and its
/// parents. Variables already set in the environment are never overridden.
/// Returns the path that was loaded, or `None` if there was nothing to load.
pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };

    match loaded {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}
