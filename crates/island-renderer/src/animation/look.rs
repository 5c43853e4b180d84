//! Cursor-driven head tracking.
//!
//! The mouse delta becomes a target yaw/pitch, which the tracker eases
//! toward every frame and spreads across the upper body.

use glam::Vec3;
use island_common::CameraMode;

use crate::avatar::{AvatarModel, HumanBone};

/// Radians of rotation per pixel of cursor offset.
pub const LOOK_SENSITIVITY: f32 = 0.002;
pub const MAX_YAW_DEGREES: f32 = 50.0;
pub const MAX_PITCH_DEGREES: f32 = 30.0;
/// Per-frame interpolation factor toward the target angles.
pub const LOOK_SMOOTHING: f32 = 0.1;

/// Share of the look rotation added to chest, neck and head.
pub const CASCADE: [(HumanBone, f32); 3] = [
    (HumanBone::UpperChest, 0.2),
    (HumanBone::Neck, 0.3),
    (HumanBone::Head, 0.5),
];

/// Tracking strength for a framing mode. The compact head framing reacts
/// at a quarter strength.
pub fn intensity_scale(mode: CameraMode) -> f32 {
    match mode {
        CameraMode::Head => 0.25,
        CameraMode::Body => 1.0,
    }
}

/// Target `(yaw, pitch)` in radians for a cursor offset.
pub fn target_angles(dx: f32, dy: f32, mode: CameraMode) -> (f32, f32) {
    let scale = intensity_scale(mode);
    let max_yaw = MAX_YAW_DEGREES.to_radians() * scale;
    let max_pitch = MAX_PITCH_DEGREES.to_radians() * scale;
    let yaw = (dx * LOOK_SENSITIVITY * scale).clamp(-max_yaw, max_yaw);
    let pitch = (dy * LOOK_SENSITIVITY * scale).clamp(-max_pitch, max_pitch);
    (yaw, pitch)
}

/// Gaze point one unit ahead of the head along the look angles.
pub fn look_target(head: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    head + Vec3::new(yaw.sin(), pitch.tan(), yaw.cos())
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookTracker {
    yaw: f32,
    pitch: f32,
}

impl LookTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn update(&mut self, target_yaw: f32, target_pitch: f32) {
        self.yaw += (target_yaw - self.yaw) * LOOK_SMOOTHING;
        self.pitch += (target_pitch - self.pitch) * LOOK_SMOOTHING;
    }

    /// Add the smoothed rotation on top of the current pose. Models
    /// without an upper chest take the chest share on the chest.
    pub fn apply_cascade<M: AvatarModel>(&self, model: &mut M) {
        for (bone, share) in CASCADE {
            let bone = if bone == HumanBone::UpperChest && model.bone_rotation_mut(bone).is_none() {
                HumanBone::Chest
            } else {
                bone
            };
            if let Some(rotation) = model.bone_rotation_mut(bone) {
                rotation.y += self.yaw * share;
                rotation.x += self.pitch * share;
            }
        }
    }
}
