//! Graceful shutdown.

use island_config::ConfigPersistence;

use super::core::IslandApp;

impl<P: ConfigPersistence> IslandApp<P> {
    /// Write any unsaved camera config.
    pub fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");
        if self.config.is_dirty() && !self.config.flush() {
            tracing::warn!("Camera config could not be saved on shutdown");
        }
    }
}
