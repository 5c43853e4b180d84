use std::time::{Duration, Instant};

use island_bridge::AssistantEvent;
use island_common::{AgentState, CameraMode, DeadlineTimer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Quiet period after a response before the panel collapses on its own.
pub const AUTO_COLLAPSE_DELAY: Duration = Duration::from_secs(5);

/// Tool label shown while the agent is thinking.
pub const THINKING_LABEL: &str = "Thinking…";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceState {
    #[default]
    Closed,
    Expanded,
}

impl PresenceState {
    /// Camera framing the renderer should use in this state.
    pub fn camera_mode(self) -> CameraMode {
        match self {
            Self::Closed => CameraMode::Head,
            Self::Expanded => CameraMode::Body,
        }
    }
}

/// Owns the presence state, its display text and the auto-collapse timer.
///
/// Every mutating call returns `Some(new_state)` when the logical state
/// changed, which the presentation layer animates toward.
#[derive(Debug, Default)]
pub struct PresenceMachine {
    state: PresenceState,
    tool_label: Option<String>,
    chat_text: String,
    is_hovering: bool,
    is_focus_locked: bool,
    auto_collapse: DeadlineTimer,
}

impl PresenceMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with placeholder chat text (shown before the first response).
    pub fn with_chat_text(text: impl Into<String>) -> Self {
        Self {
            chat_text: text.into(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    pub fn tool_label(&self) -> Option<&str> {
        self.tool_label.as_deref()
    }

    pub fn chat_text(&self) -> &str {
        &self.chat_text
    }

    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    pub fn is_focus_locked(&self) -> bool {
        self.is_focus_locked
    }

    pub fn auto_collapse_pending(&self) -> bool {
        self.auto_collapse.is_pending()
    }

    pub fn auto_collapse_deadline(&self) -> Option<Instant> {
        self.auto_collapse.deadline()
    }

    pub fn hover_started(&mut self) -> Option<PresenceState> {
        self.is_hovering = true;
        self.auto_collapse.cancel();
        self.transition(PresenceState::Expanded, "hover started")
    }

    pub fn hover_ended(&mut self) -> Option<PresenceState> {
        self.is_hovering = false;
        if self.is_focus_locked {
            return None;
        }
        self.transition(PresenceState::Closed, "hover ended")
    }

    /// Hold the panel open while a settings surface edits body framing.
    pub fn enter_focus_lock(&mut self) -> Option<PresenceState> {
        self.is_focus_locked = true;
        self.auto_collapse.cancel();
        self.transition(PresenceState::Expanded, "focus lock entered")
    }

    pub fn exit_focus_lock(&mut self) -> Option<PresenceState> {
        self.is_focus_locked = false;
        if self.is_hovering {
            return None;
        }
        self.transition(PresenceState::Closed, "focus lock exited")
    }

    /// Apply an assistant event.
    pub fn handle_event(&mut self, event: &AssistantEvent, now: Instant) -> Option<PresenceState> {
        match event {
            AssistantEvent::AssistantResponse {
                content, tool_info, ..
            } => {
                self.tool_label = tool_info.as_ref().map(|tool| tool.name.clone());
                if content.is_empty() {
                    return None;
                }
                self.chat_text = content.clone();
                self.auto_collapse.schedule(now, AUTO_COLLAPSE_DELAY);
                self.transition(PresenceState::Expanded, "assistant response")
            }
            AssistantEvent::AgentStateChange { state } => match state {
                AgentState::Thinking => {
                    self.tool_label = Some(THINKING_LABEL.to_string());
                    // Stays open until an explicit idle.
                    self.auto_collapse.cancel();
                    self.transition(PresenceState::Expanded, "agent thinking")
                }
                AgentState::Idle => {
                    self.tool_label = None;
                    self.auto_collapse.cancel();
                    self.transition(PresenceState::Closed, "agent idle")
                }
                AgentState::Listening => None,
            },
        }
    }

    /// Drive the auto-collapse timer.
    ///
    /// Hover and focus-lock are re-checked at fire time; if either holds,
    /// the timer is spent without a transition.
    pub fn poll(&mut self, now: Instant) -> Option<PresenceState> {
        self.auto_collapse.poll(now)?;
        if self.is_hovering || self.is_focus_locked {
            debug!(
                hovering = self.is_hovering,
                focus_locked = self.is_focus_locked,
                "Auto-collapse suppressed"
            );
            return None;
        }
        self.transition(PresenceState::Closed, "auto-collapse")
    }

    fn transition(&mut self, next: PresenceState, cause: &'static str) -> Option<PresenceState> {
        if self.state == next {
            return None;
        }
        debug!(from = ?self.state, to = ?next, cause, "Presence transition");
        self.state = next;
        Some(next)
    }
}
