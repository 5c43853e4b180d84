//! Partial updates applied through [`crate::ConfigStore::update`].

use island_common::CameraMode;

use crate::schema::{CameraConfig, CameraPosition};

/// A change to the camera config. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigPatch {
    Camera {
        mode: CameraMode,
        position: Option<CameraPosition>,
        target: Option<CameraPosition>,
        fov: Option<f64>,
    },
    FollowMouse(bool),
    LerpSpeed(f64),
}

impl ConfigPatch {
    pub fn fov(mode: CameraMode, fov: f64) -> Self {
        Self::Camera {
            mode,
            position: None,
            target: None,
            fov: Some(fov),
        }
    }

    pub fn position(mode: CameraMode, position: CameraPosition) -> Self {
        Self::Camera {
            mode,
            position: Some(position),
            target: None,
            fov: None,
        }
    }

    /// Merge this patch into `config`.
    pub fn apply(&self, config: &mut CameraConfig) {
        match self {
            Self::Camera {
                mode,
                position,
                target,
                fov,
            } => {
                let setting = config.setting_mut(*mode);
                if let Some(position) = position {
                    setting.position = *position;
                }
                if let Some(target) = target {
                    setting.target = *target;
                }
                if let Some(fov) = fov {
                    setting.fov = *fov;
                }
            }
            Self::FollowMouse(follow) => config.follow_mouse = *follow,
            Self::LerpSpeed(speed) => config.lerp_speed = *speed,
        }
    }
}
