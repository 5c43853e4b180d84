//! Write CameraConfig to JSON on disk.
//!
//! Writes are atomic (write to `.tmp`, then rename) so a crash mid-write
//! never leaves a truncated document behind.

use std::path::Path;

use island_common::ConfigError;

use crate::config_to_json;
use crate::json_loader::default_config_path;
use crate::schema::CameraConfig;

/// Write config to the platform default path.
pub fn save_config(config: &CameraConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write config to a specific path, creating parent directories as needed.
pub fn save_config_to_path(config: &CameraConfig, path: &Path) -> Result<(), ConfigError> {
    let json = config_to_json(config);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::PersistenceUnavailable(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(|e| {
        ConfigError::PersistenceUnavailable(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename can fail across volumes; fall back to a direct write.
        tracing::warn!("atomic rename failed ({}), falling back to direct write", e);
        std::fs::write(path, &json).map_err(|e2| {
            ConfigError::PersistenceUnavailable(format!(
                "failed to write config to {}: {e2}",
                path.display()
            ))
        })?;
    }

    tracing::debug!(path = %path.display(), "Camera config saved to disk");
    Ok(())
}
