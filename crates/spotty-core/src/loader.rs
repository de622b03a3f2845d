//! Config file discovery and loading.

use crate::error::{ConfigError, Result};
use crate::model::SpottyConfig;
use std::path::{Path, PathBuf};

/// Locate the project config file.
///
/// Search order:
/// 1. `SPOTTY_CONFIG_PATH` environment variable (direct path)
/// 2. `spotty.yaml`, then `.spotty.yaml`, in the current directory
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var("SPOTTY_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    for filename in ["spotty.yaml", ".spotty.yaml"] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// Load and validate the config file at `path`.
pub fn load_config(path: &Path) -> Result<SpottyConfig> {
    tracing::debug!(path = %path.display(), "Loading config");

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: SpottyConfig = serde_yaml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}
