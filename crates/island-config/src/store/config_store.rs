//! The [`ConfigStore`] and the renderer-facing [`ConfigSink`] seam.

use std::time::{Duration, Instant};

use island_common::{CameraMode, DeadlineTimer};
use tracing::{debug, info, warn};

use super::persistence::ConfigPersistence;
use crate::patch::ConfigPatch;
use crate::schema::{CameraConfig, CameraSetting};
use crate::{config_to_json, validation};

/// Quiet period before a burst of edits is written to storage.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Receives the full config whenever it should reach the renderer.
pub trait ConfigSink {
    /// First delivery after startup.
    fn set_camera_config(&self, config: &CameraConfig);

    /// Live preview of an edit.
    fn update_camera_config(&self, config: &CameraConfig);
}

/// Owner of the single live [`CameraConfig`].
///
/// Settings edits and bridge patches both go through [`ConfigStore::update`];
/// the last write wins.
pub struct ConfigStore<P, S> {
    config: CameraConfig,
    persistence: P,
    sink: S,
    debounce: DeadlineTimer,
    dirty: bool,
}

impl<P: ConfigPersistence, S: ConfigSink> ConfigStore<P, S> {
    /// Load the persisted config, or fall back to defaults and persist them once.
    pub fn open(persistence: P, sink: S) -> Self {
        let loaded = match persistence.load() {
            Ok(Some(config)) => {
                info!("Using persisted camera config");
                Some(config)
            }
            Ok(None) => {
                info!("No camera config stored, using defaults");
                None
            }
            Err(e) => {
                warn!(error = %e, "Camera config unusable, using defaults");
                None
            }
        };

        let mut store = Self {
            config: loaded.clone().unwrap_or_default(),
            persistence,
            sink,
            debounce: DeadlineTimer::new(),
            dirty: false,
        };
        if loaded.is_none() {
            store.persist_now();
        }
        store
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn setting(&self, mode: CameraMode) -> &CameraSetting {
        self.config.setting(mode)
    }

    pub fn follow_mouse(&self) -> bool {
        self.config.follow_mouse
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    /// Whether an edit has not reached durable storage yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Send the current config as the renderer's initial value.
    pub fn publish_initial(&self) {
        self.sink.set_camera_config(&self.config);
    }

    /// Merge a patch, preview it on the renderer and (re)arm the persist debounce.
    ///
    /// A patch that would leave the config invalid is dropped.
    pub fn update(&mut self, patch: ConfigPatch, now: Instant) {
        let mut next = self.config.clone();
        patch.apply(&mut next);
        if let Err(e) = validation::validate(&next) {
            warn!(error = %e, ?patch, "Rejected camera config patch");
            return;
        }

        debug!(?patch, "Camera config updated");
        self.config = next;
        self.dirty = true;
        self.sink.update_camera_config(&self.config);
        self.debounce.schedule(now, PERSIST_DEBOUNCE);
    }

    /// Restore built-in defaults and persist them without waiting.
    pub fn reset(&mut self) {
        info!("Resetting camera config to defaults");
        self.config = CameraConfig::default();
        self.debounce.cancel();
        self.persist_now();
        self.sink.update_camera_config(&self.config);
    }

    /// Drive the debounce timer. Returns `true` if a write happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.debounce.poll(now).is_none() {
            return false;
        }
        self.persist_now()
    }

    /// Write a pending edit immediately (e.g. on shutdown).
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.debounce.cancel();
        self.persist_now()
    }

    /// The document that is written to storage.
    pub fn to_serializable(&self) -> String {
        config_to_json(&self.config)
    }

    fn persist_now(&mut self) -> bool {
        match self.persistence.save(&self.config) {
            Ok(()) => {
                self.dirty = false;
                true
            }
            Err(e) => {
                // Stay dirty; the next debounce cycle retries.
                warn!(error = %e, "Failed to persist camera config");
                self.dirty = true;
                false
            }
        }
    }
}
