use glam::Vec3;
use island_common::Face;

/// Humanoid bones the animation engine touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HumanBone {
    Hips,
    Spine,
    Chest,
    UpperChest,
    Neck,
    Head,
}

impl HumanBone {
    /// Root to head order.
    pub const CHAIN: [HumanBone; 6] = [
        HumanBone::Hips,
        HumanBone::Spine,
        HumanBone::Chest,
        HumanBone::UpperChest,
        HumanBone::Neck,
        HumanBone::Head,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One idle-clip sample contributing to the frame's pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseLayer {
    /// Playback position in seconds.
    pub time: f32,
    pub weight: f32,
}

/// A loaded, posable avatar.
///
/// Local bone rotations are Euler angles in radians: `x` pitch, `y` yaw,
/// `z` roll.
pub trait AvatarModel {
    /// Length of the idle clip in seconds, if the model has one.
    fn idle_clip_duration(&self) -> Option<f32>;

    /// Overwrite bone rotations with the weighted blend of `layers`.
    fn apply_idle_pose(&mut self, layers: &[PoseLayer]);

    fn bone_rotation_mut(&mut self, bone: HumanBone) -> Option<&mut Vec3>;

    /// World-space position of a bone with the current pose applied.
    fn bone_world_position(&self, bone: HumanBone) -> Option<Vec3>;

    fn set_expression_weight(&mut self, face: Face, weight: f32);

    /// Point the gaze system aims at.
    fn set_look_target(&mut self, target: Vec3);

    /// Advance model-internal systems (gaze, secondary motion).
    fn update(&mut self, delta: f32);
}
