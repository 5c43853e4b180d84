//! Fire-and-forget command channel from the UI context to the render loop.

use island_common::{AgentState, CameraMode};
use island_config::{CameraConfig, ConfigSink};
use tokio::sync::mpsc;

use crate::commands::RendererCommand;
use crate::events::Performance;

/// Create a connected sender/receiver pair.
pub fn channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (BridgeSender { tx }, BridgeReceiver { rx })
}

/// Cloneable handle for issuing renderer commands. Never blocks.
#[derive(Debug, Clone)]
pub struct BridgeSender {
    tx: mpsc::UnboundedSender<RendererCommand>,
}

impl BridgeSender {
    /// Queue a command. Returns `false` if the render loop is gone.
    pub fn send(&self, command: RendererCommand) -> bool {
        let name = command.name();
        match self.tx.send(command) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!(command = name, "Renderer channel closed, command dropped");
                false
            }
        }
    }

    pub fn set_mode(&self, mode: CameraMode) -> bool {
        self.send(RendererCommand::SetMode(mode))
    }

    pub fn update_mouse_delta(&self, dx: f64, dy: f64) -> bool {
        self.send(RendererCommand::UpdateMouseDelta { dx, dy })
    }

    pub fn update_viewport_size(&self, width: f64, height: f64) -> bool {
        self.send(RendererCommand::UpdateViewportSize { width, height })
    }

    pub fn trigger_performance(&self, performance: Performance) -> bool {
        self.send(RendererCommand::TriggerPerformance(performance))
    }

    pub fn set_agent_state(&self, state: AgentState) -> bool {
        self.send(RendererCommand::SetAgentState(state))
    }
}

impl ConfigSink for BridgeSender {
    fn set_camera_config(&self, config: &CameraConfig) {
        self.send(RendererCommand::SetCameraConfig(config.clone()));
    }

    fn update_camera_config(&self, config: &CameraConfig) {
        self.send(RendererCommand::UpdateCameraConfig(config.clone()));
    }
}

/// Render-loop end of the channel.
#[derive(Debug)]
pub struct BridgeReceiver {
    rx: mpsc::UnboundedReceiver<RendererCommand>,
}

impl BridgeReceiver {
    /// Take everything queued so far, in issue order, without waiting.
    pub fn drain(&mut self) -> Vec<RendererCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            commands.push(command);
        }
        commands
    }
}
