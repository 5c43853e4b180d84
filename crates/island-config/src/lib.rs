//! Island camera configuration.
//!
//! Holds the dual-mode camera framing (`head` / `body`), the mouse-follow
//! toggle and the camera interpolation speed. The [`ConfigStore`] owns the
//! live value, pushes every change to the renderer immediately and
//! persists it to disk behind a 500 ms debounce.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use island_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load camera config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod json_loader;
pub mod json_writer;
pub mod patch;
pub mod schema;
pub mod store;
pub mod validation;

pub use json_writer::{save_config, save_config_to_path};
pub use patch::ConfigPatch;
pub use schema::{CameraConfig, CameraPosition, CameraSetting};
pub use store::{
    ConfigPersistence, ConfigSink, ConfigStore, FilePersistence, MemoryPersistence,
    PERSIST_DEBOUNCE,
};

use island_common::ConfigError;

/// Load the camera config from the platform default path.
///
/// A missing file yields the built-in defaults; an unreadable or invalid
/// file is reported as an error so the caller can decide to fall back.
pub fn load_config() -> Result<CameraConfig, ConfigError> {
    let path = json_loader::default_config_path()?;
    match json_loader::load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => Ok(CameraConfig::default()),
        other => other,
    }
}

/// Serialize a config to the flat JSON document used on disk and on the bridge.
pub fn config_to_json(config: &CameraConfig) -> String {
    serde_json::to_string(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
