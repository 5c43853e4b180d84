//! Readiness gate on the renderer side of the bridge.
//!
//! Before the scene exists, transient commands (mouse deltas, modes,
//! performances) are dropped, while the newest camera config is held in a
//! single slot and delivered once the scene reports ready.

use island_common::BridgeError;
use island_config::CameraConfig;

use crate::commands::RendererCommand;

#[derive(Debug, Default)]
pub struct RendererInbox {
    ready: bool,
    pending_config: Option<CameraConfig>,
}

impl RendererInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pending_config(&self) -> Option<&CameraConfig> {
        self.pending_config.as_ref()
    }

    /// Gate a command. `Ok` means apply it now.
    ///
    /// While not ready, config commands overwrite the pending slot and
    /// everything else is discarded; both report
    /// [`BridgeError::RendererNotReady`].
    pub fn accept(&mut self, command: RendererCommand) -> Result<RendererCommand, BridgeError> {
        if self.ready {
            return Ok(command);
        }

        let name = command.name();
        match command {
            RendererCommand::SetCameraConfig(config) | RendererCommand::UpdateCameraConfig(config) => {
                if self.pending_config.replace(config).is_some() {
                    tracing::debug!(command = name, "Replaced unflushed camera config");
                } else {
                    tracing::debug!(command = name, "Camera config queued until renderer is ready");
                }
            }
            _ => tracing::debug!(command = name, "Renderer not ready, command discarded"),
        }
        Err(BridgeError::RendererNotReady(name))
    }

    /// Mark the renderer ready and hand back the queued config, if any.
    pub fn mark_ready(&mut self) -> Option<RendererCommand> {
        self.ready = true;
        self.pending_config
            .take()
            .map(RendererCommand::SetCameraConfig)
    }

    /// Scene torn down; gate commands again.
    pub fn mark_not_ready(&mut self) {
        self.ready = false;
    }
}
