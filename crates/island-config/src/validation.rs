//! Range checks for camera configuration.

use crate::schema::{CameraConfig, CameraSetting};
use island_common::ConfigError;

/// Validate a config, collecting every problem into one error.
pub fn validate(config: &CameraConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_setting(&mut errors, "head", &config.head);
    validate_setting(&mut errors, "body", &config.body);

    if !(config.lerp_speed > 0.0 && config.lerp_speed <= 1.0) {
        errors.push(format!(
            "lerpSpeed = {} is out of range (0, 1]",
            config.lerp_speed
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_setting(errors: &mut Vec<String>, name: &str, setting: &CameraSetting) {
    if !setting.position.is_finite() {
        errors.push(format!("{name}.position has a non-finite component"));
    }
    if !setting.target.is_finite() {
        errors.push(format!("{name}.target has a non-finite component"));
    }
    if !(setting.fov > 0.0 && setting.fov < 180.0) {
        errors.push(format!("{name}.fov = {} is out of range (0, 180)", setting.fov));
    }
}
