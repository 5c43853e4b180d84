//! Renderer-facing call surface.
//!
//! Each command maps to one function the web renderer exposes on
//! `window`. [`RendererCommand::to_script`] produces the guarded call a
//! webview host evaluates; an in-process renderer applies the command
//! directly instead.

use island_common::{AgentState, CameraMode};
use island_config::CameraConfig;
use serde::Serialize;

use crate::events::Performance;

#[derive(Debug, Clone, PartialEq)]
pub enum RendererCommand {
    SetMode(CameraMode),
    UpdateMouseDelta { dx: f64, dy: f64 },
    UpdateViewportSize { width: f64, height: f64 },
    TriggerPerformance(Performance),
    SetAgentState(AgentState),
    /// Initial config. Queued (one deep) until the renderer is ready.
    SetCameraConfig(CameraConfig),
    /// Live config preview.
    UpdateCameraConfig(CameraConfig),
}

impl RendererCommand {
    /// Name of the renderer function this command invokes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetMode(_) => "setMode",
            Self::UpdateMouseDelta { .. } => "updateMouseDelta",
            Self::UpdateViewportSize { .. } => "updateViewportSize",
            Self::TriggerPerformance(_) => "triggerPerformance",
            Self::SetAgentState(_) => "setAgentState",
            Self::SetCameraConfig(_) => "setCameraConfig",
            Self::UpdateCameraConfig(_) => "updateCameraConfig",
        }
    }

    /// Whether this carries camera configuration (kept across a not-ready renderer).
    pub fn is_config(&self) -> bool {
        matches!(self, Self::SetCameraConfig(_) | Self::UpdateCameraConfig(_))
    }

    /// Render the guarded JavaScript call for a webview renderer.
    pub fn to_script(&self) -> String {
        let name = self.name();
        match self {
            Self::SetMode(mode) => js_call(name, &[json_arg(&mode.as_str())]),
            Self::UpdateMouseDelta { dx, dy } => js_call(name, &[json_arg(dx), json_arg(dy)]),
            Self::UpdateViewportSize { width, height } => {
                js_call(name, &[json_arg(width), json_arg(height)])
            }
            Self::TriggerPerformance(perf) => js_call(name, &[json_arg(perf)]),
            Self::SetAgentState(state) => js_call(name, &[json_arg(&state.as_str())]),
            Self::UpdateCameraConfig(config) => js_call(name, &[json_arg(config)]),
            Self::SetCameraConfig(config) => {
                // The page may not have installed its handler yet; park the
                // value where the page picks it up on startup.
                let arg = json_arg(config);
                format!(
                    "if(window.{name}) window.{name}({arg}); else window.__pendingCameraConfig = {arg};"
                )
            }
        }
    }
}

fn json_arg<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn js_call(name: &str, args: &[String]) -> String {
    format!("if(window.{name}) window.{name}({});", args.join(", "))
}
