//! Inbound message routing.

use std::time::Instant;

use island_bridge::{decode, AssistantEvent};
use island_common::BridgeError;
use island_config::{ConfigPatch, ConfigPersistence};
use island_presence::SurfaceGeometry;

use super::core::IslandApp;
use super::host_input::HostInput;

impl<P: ConfigPersistence> IslandApp<P> {
    /// Route one inbound text frame: a host message or an assistant
    /// envelope. Malformed input is logged and dropped.
    pub fn handle_message(&mut self, raw: &str, now: Instant) -> Result<(), BridgeError> {
        let result = match HostInput::parse(raw) {
            Ok(Some(input)) => {
                self.handle_host_input(input, now);
                Ok(())
            }
            Ok(None) => self.handle_envelope(raw, now),
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            tracing::warn!("Dropped inbound message: {e}");
        }
        result
    }

    /// Decode an assistant envelope and fan it out to the config store,
    /// the renderer and the presence machine, in that order.
    pub fn handle_envelope(&mut self, raw: &str, now: Instant) -> Result<(), BridgeError> {
        let inbound = decode(raw)?;
        tracing::debug!(kind = inbound.event.kind(), "Envelope received");

        if let Some(follow) = inbound.follow_mouse {
            self.config.update(ConfigPatch::FollowMouse(follow), now);
        }

        match &inbound.event {
            AssistantEvent::AssistantResponse {
                performance: Some(performance),
                ..
            } => {
                self.bridge.trigger_performance(performance.clone());
            }
            AssistantEvent::AssistantResponse { .. } => {}
            AssistantEvent::AgentStateChange { state } => {
                self.bridge.set_agent_state(*state);
            }
        }

        if let Some(state) = self.presence.handle_event(&inbound.event, now) {
            self.announce(state);
        }
        Ok(())
    }

    pub(super) fn handle_host_input(&mut self, input: HostInput, now: Instant) {
        if let Some(patch) = input.config_patch() {
            self.config.update(patch, now);
            return;
        }

        let changed = match input {
            HostInput::HoverStart => self.presence.hover_started(),
            HostInput::HoverEnd => self.presence.hover_ended(),
            HostInput::FocusLock => self.presence.enter_focus_lock(),
            HostInput::FocusUnlock => self.presence.exit_focus_lock(),
            HostInput::Cursor { x, y } => {
                self.mouse.source_mut().set(x, y);
                None
            }
            HostInput::Screen {
                notch_width,
                top_inset,
            } => {
                self.compact = SurfaceGeometry::compact_for_screen(notch_width, top_inset);
                tracing::info!(
                    width = self.compact.width,
                    height = self.compact.height,
                    "Compact geometry updated"
                );
                Some(self.presence.state())
            }
            HostInput::ResetCamera => {
                self.config.reset();
                None
            }
            HostInput::Camera { .. } | HostInput::LerpSpeed { .. } | HostInput::FollowMouse { .. } => None,
        };

        if let Some(state) = changed {
            self.announce(state);
        }
    }
}
