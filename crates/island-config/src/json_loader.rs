//! JSON config file loading.

use crate::schema::CameraConfig;
use crate::validation;
use island_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

/// Decode and validate a config document.
///
/// This is the single decode path shared by disk loads and round-trip
/// checks.
pub fn decode(json: &str) -> Result<CameraConfig, ConfigError> {
    let config: CameraConfig = serde_json::from_str(json)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse camera config: {e}")))?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from a specific JSON file path.
pub fn load_from_path(path: &Path) -> Result<CameraConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::PersistenceUnavailable(format!("failed to read {}: {e}", path.display()))
    })?;

    let config = decode(&content)?;
    info!("loaded camera config from {}", path.display());
    Ok(config)
}

/// Get the platform-specific default config file path.
///
/// On macOS: `~/Library/Application Support/island/camera.json`
/// On Linux: `~/.config/island/camera.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::PersistenceUnavailable("could not determine config directory".into())
    })?;
    Ok(config_dir.join("island").join("camera.json"))
}
