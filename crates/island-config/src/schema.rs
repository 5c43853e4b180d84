//! Camera configuration schema.
//!
//! The JSON shape is flat and camelCase so the same document can be handed
//! to the web renderer unchanged.

use island_common::CameraMode;
use serde::{Deserialize, Serialize};

/// A point in avatar world space (metres, y-up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CameraPosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Framing for one camera mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSetting {
    pub position: CameraPosition,
    pub target: CameraPosition,
    /// Vertical field of view in degrees.
    pub fov: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraConfig {
    pub head: CameraSetting,
    pub body: CameraSetting,
    /// Fraction of the remaining distance the camera covers per frame.
    pub lerp_speed: f64,
    /// Older documents predate this flag; they load with tracking off.
    #[serde(default)]
    pub follow_mouse: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            head: CameraSetting {
                position: CameraPosition::new(0.05, 1.45, 2.15),
                target: CameraPosition::new(0.05, 1.45, 0.0),
                fov: 40.0,
            },
            body: CameraSetting {
                position: CameraPosition::new(0.0, 1.4, 0.6),
                target: CameraPosition::new(0.0, 1.4, 0.0),
                fov: 40.0,
            },
            lerp_speed: 0.05,
            follow_mouse: false,
        }
    }
}

impl CameraConfig {
    pub fn setting(&self, mode: CameraMode) -> &CameraSetting {
        match mode {
            CameraMode::Head => &self.head,
            CameraMode::Body => &self.body,
        }
    }

    pub fn setting_mut(&mut self, mode: CameraMode) -> &mut CameraSetting {
        match mode {
            CameraMode::Head => &mut self.head,
            CameraMode::Body => &mut self.body,
        }
    }
}
