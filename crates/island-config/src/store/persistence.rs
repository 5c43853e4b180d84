//! Durable storage backends for the camera config.

use std::path::{Path, PathBuf};

use island_common::ConfigError;

use crate::json_loader;
use crate::json_writer;
use crate::schema::CameraConfig;
use crate::config_to_json;

/// Somewhere the camera config can be read from and written to.
pub trait ConfigPersistence {
    /// Read the stored config. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<CameraConfig>, ConfigError>;

    fn save(&mut self, config: &CameraConfig) -> Result<(), ConfigError>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the platform default location.
    pub fn at_default_path() -> Result<Self, ConfigError> {
        Ok(Self::new(json_loader::default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPersistence for FilePersistence {
    fn load(&self) -> Result<Option<CameraConfig>, ConfigError> {
        match json_loader::load_from_path(&self.path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&mut self, config: &CameraConfig) -> Result<(), ConfigError> {
        json_writer::save_config_to_path(config, &self.path)
    }
}

/// In-memory document store. Keeps the serialized JSON so loads go
/// through the same decode path as files.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    document: Option<String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw stored document (which may be invalid).
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Some(document.into()),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ConfigPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<CameraConfig>, ConfigError> {
        if self.fail_reads {
            return Err(ConfigError::PersistenceUnavailable("store unreadable".into()));
        }
        self.document.as_deref().map(json_loader::decode).transpose()
    }

    fn save(&mut self, config: &CameraConfig) -> Result<(), ConfigError> {
        if self.fail_writes {
            return Err(ConfigError::PersistenceUnavailable("store unwritable".into()));
        }
        self.document = Some(config_to_json(config));
        self.writes += 1;
        Ok(())
    }
}
