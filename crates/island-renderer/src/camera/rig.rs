use glam::Vec3;
use island_common::CameraMode;
use island_config::{CameraConfig, CameraPosition};

use crate::avatar::{AvatarModel, HumanBone};

/// Sideways shift applied to head framing so the avatar sits slightly
/// left of center.
pub const VISUAL_OFFSET_X: f32 = 0.05;
/// Look-at height above the head bone in head framing.
pub const HEAD_LIFT: f32 = 0.05;
/// Camera distance in front of the head in head framing.
pub const HEAD_DISTANCE: f32 = 0.55;
pub const DEFAULT_LERP_SPEED: f32 = 0.05;
/// Extra room around the fitted body span.
pub const FIT_MARGIN: f32 = 1.5;

const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 1.4, 0.6);
const INITIAL_LOOK_AT: Vec3 = Vec3::new(0.0, 1.4, 0.0);
const INITIAL_FOV: f32 = 40.0;

pub fn to_vec3(p: &CameraPosition) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Distance at which `visible_height` fills a vertical field of view of
/// `fov_degrees`, with [`FIT_MARGIN`] to spare.
pub fn fit_distance(visible_height: f32, fov_degrees: f32) -> f32 {
    (visible_height / 2.0) / (fov_degrees.to_radians() / 2.0).tan() * FIT_MARGIN
}

/// The viewing camera. `fov` is vertical, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov: f32,
    pub aspect: f32,
}

impl PerspectiveCamera {
    pub fn new() -> Self {
        Self {
            position: INITIAL_POSITION,
            look_at: INITIAL_LOOK_AT,
            fov: INITIAL_FOV,
            aspect: 1.0,
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = (width / height) as f32;
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Eases the camera toward the framing for the current mode.
///
/// Head framing follows the live head bone every frame. Body framing uses
/// the configured placement, optionally pulled back so the head-to-hips
/// span fits the field of view.
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    config: Option<CameraConfig>,
    target_position: Vec3,
    target_look_at: Vec3,
    body_span: Option<f32>,
    fit_body: bool,
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            mode: CameraMode::Head,
            config: None,
            target_position: INITIAL_POSITION,
            target_look_at: INITIAL_LOOK_AT,
            body_span: None,
            fit_body: false,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn config(&self) -> Option<&CameraConfig> {
        self.config.as_ref()
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn target_look_at(&self) -> Vec3 {
        self.target_look_at
    }

    pub fn lerp_speed(&self) -> f32 {
        self.config
            .as_ref()
            .map(|c| c.lerp_speed as f32)
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_LERP_SPEED)
    }

    pub fn set_body_span(&mut self, span: Option<f32>) {
        self.body_span = span;
    }

    /// Pull the body framing back to fit the avatar instead of using the
    /// configured distance.
    pub fn set_fit_body(&mut self, fit: bool, camera: &mut PerspectiveCamera) {
        self.fit_body = fit;
        self.retarget(camera);
    }

    pub fn set_mode(&mut self, mode: CameraMode, camera: &mut PerspectiveCamera) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "camera mode");
        }
        self.mode = mode;
        self.retarget(camera);
    }

    pub fn set_config(&mut self, config: CameraConfig, camera: &mut PerspectiveCamera) {
        self.config = Some(config);
        self.retarget(camera);
    }

    fn retarget(&mut self, camera: &mut PerspectiveCamera) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let setting = config.setting(self.mode);
        let mut position = to_vec3(&setting.position);
        let mut look_at = to_vec3(&setting.target);
        let fov = setting.fov as f32;

        match self.mode {
            CameraMode::Head => {
                position.x += VISUAL_OFFSET_X;
                look_at.x += VISUAL_OFFSET_X;
            }
            CameraMode::Body => {
                if let (true, Some(span)) = (self.fit_body, self.body_span) {
                    let direction = (position - look_at).try_normalize().unwrap_or(Vec3::Z);
                    position = look_at + direction * fit_distance(span, fov);
                }
            }
        }

        self.target_position = position;
        self.target_look_at = look_at;
        if camera.fov != fov {
            camera.fov = fov;
        }
    }

    /// Move the camera one frame toward its target.
    pub fn update<M: AvatarModel>(&mut self, model: Option<&M>, camera: &mut PerspectiveCamera) {
        if self.mode == CameraMode::Head {
            if let Some(head) = model.and_then(|m| m.bone_world_position(HumanBone::Head)) {
                let look_at = Vec3::new(head.x + VISUAL_OFFSET_X, head.y + HEAD_LIFT, head.z);
                self.target_look_at = look_at;
                self.target_position = look_at + Vec3::new(0.0, 0.0, HEAD_DISTANCE);
            }
        }

        let speed = self.lerp_speed();
        camera.position = camera.position.lerp(self.target_position, speed);
        camera.look_at = camera.look_at.lerp(self.target_look_at, speed);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}
