//! Decoded assistant events.

use island_common::{AgentState, Face};
use serde::{Deserialize, Serialize};

/// Default expression strength when a command omits `intensity`.
pub const DEFAULT_INTENSITY: f32 = 1.0;
/// Default expression hold time in seconds when a command omits `duration`.
pub const DEFAULT_DURATION: f32 = 5.0;
/// Longest accepted hold time in seconds; larger values are clamped.
pub const MAX_DURATION: f32 = 3600.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub status: String,
    pub name: String,
}

/// One expression/action command with an implicit expiry.
///
/// Optional wire fields are resolved to their defaults at decode time, so
/// the renderer never sees a missing intensity or duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub face: Face,
    /// Expression weight in `[0, 1]`.
    pub intensity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Accepted but not played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Seconds the expression is held before fading out.
    pub duration: f32,
}

impl Performance {
    pub fn new(face: Face) -> Self {
        Self {
            face,
            intensity: DEFAULT_INTENSITY,
            action: None,
            audio_url: None,
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = sanitize_intensity(Some(intensity));
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = sanitize_duration(Some(duration));
        self
    }
}

pub(crate) fn sanitize_intensity(raw: Option<f32>) -> f32 {
    match raw {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => DEFAULT_INTENSITY,
    }
}

pub(crate) fn sanitize_duration(raw: Option<f32>) -> f32 {
    match raw {
        Some(v) if v.is_finite() && v >= 0.0 => v.min(MAX_DURATION),
        _ => DEFAULT_DURATION,
    }
}

/// A self-contained event from the assistant process.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantEvent {
    AssistantResponse {
        content: String,
        tool_info: Option<ToolInfo>,
        performance: Option<Performance>,
    },
    AgentStateChange {
        state: AgentState,
    },
}

impl AssistantEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AssistantResponse { .. } => "assistant_response",
            Self::AgentStateChange { .. } => "agent_state",
        }
    }
}
