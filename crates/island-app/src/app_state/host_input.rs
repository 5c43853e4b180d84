//! Messages from the native host shell (hover, cursor, settings edits).
//!
//! Host messages share the listener with assistant envelopes and are told
//! apart by a top-level `host` key.

use island_common::{BridgeError, CameraMode};
use island_config::{CameraPosition, ConfigPatch};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "host", rename_all = "snake_case")]
pub enum HostInput {
    HoverStart,
    HoverEnd,
    FocusLock,
    FocusUnlock,
    /// Cursor position relative to the surface's top-left corner.
    Cursor { x: f64, y: f64 },
    #[serde(rename_all = "camelCase")]
    Screen {
        notch_width: Option<f64>,
        top_inset: Option<f64>,
    },
    Camera {
        mode: CameraMode,
        #[serde(default)]
        position: Option<CameraPosition>,
        #[serde(default)]
        target: Option<CameraPosition>,
        #[serde(default)]
        fov: Option<f64>,
    },
    LerpSpeed { value: f64 },
    FollowMouse { enabled: bool },
    ResetCamera,
}

impl HostInput {
    /// `Ok(None)` when `raw` is not a host message.
    pub fn parse(raw: &str) -> Result<Option<Self>, BridgeError> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| BridgeError::MalformedEvent(format!("invalid message: {e}")))?;
        if value.get("host").is_none() {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| BridgeError::MalformedEvent(format!("invalid host message: {e}")))
    }

    /// The config edit this message carries, if any.
    pub fn config_patch(&self) -> Option<ConfigPatch> {
        match self {
            Self::Camera {
                mode,
                position,
                target,
                fov,
            } => Some(ConfigPatch::Camera {
                mode: *mode,
                position: *position,
                target: *target,
                fov: *fov,
            }),
            Self::LerpSpeed { value } => Some(ConfigPatch::LerpSpeed(*value)),
            Self::FollowMouse { enabled } => Some(ConfigPatch::FollowMouse(*enabled)),
            _ => None,
        }
    }
}
