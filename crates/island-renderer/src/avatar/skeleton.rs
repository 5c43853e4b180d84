//! A procedural humanoid used when no asset-backed model is attached.
//!
//! Six bones from hips to head, a breathing idle clip built from sine
//! sway, expression weights and a gaze target. The avatar is turned half
//! a revolution so it faces a camera on the +Z side.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use island_common::Face;

use super::types::{AvatarModel, HumanBone, PoseLayer};

/// Rest offset of each bone from its parent, indexed like [`HumanBone::CHAIN`].
const REST_OFFSETS: [Vec3; 6] = [
    Vec3::new(0.0, 0.95, 0.0),
    Vec3::new(0.0, 0.10, 0.0),
    Vec3::new(0.0, 0.12, 0.0),
    Vec3::new(0.0, 0.12, 0.0),
    Vec3::new(0.0, 0.12, 0.0),
    Vec3::new(0.0, 0.10, 0.0),
];

/// Sine-based idle clip. Each bone sways on each axis with its own
/// amplitude; axes are phase-shifted so the motion never lines up.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleSway {
    duration: f32,
    amplitudes: [Vec3; 6],
}

impl IdleSway {
    pub fn new(duration: f32, amplitudes: [Vec3; 6]) -> Self {
        Self {
            duration,
            amplitudes,
        }
    }

    /// Slow breathing with a little head drift.
    pub fn breathing() -> Self {
        Self::new(
            4.0,
            [
                Vec3::ZERO,
                Vec3::new(0.02, 0.0, 0.0),
                Vec3::new(0.015, 0.0, 0.005),
                Vec3::new(0.01, 0.0, 0.0),
                Vec3::new(0.0, 0.02, 0.0),
                Vec3::new(0.03, 0.04, 0.01),
            ],
        )
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn sample(&self, bone: HumanBone, time: f32) -> Vec3 {
        let phase = TAU * time / self.duration;
        let amp = self.amplitudes[bone.index()];
        Vec3::new(
            amp.x * phase.sin(),
            amp.y * (phase + 1.3).sin(),
            amp.z * (phase + 2.6).sin(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct SkeletonAvatar {
    root_position: Vec3,
    root_rotation: Quat,
    rotations: [Vec3; 6],
    idle: Option<IdleSway>,
    expressions: [f32; 6],
    look_target: Option<Vec3>,
    elapsed: f32,
}

impl SkeletonAvatar {
    pub fn new() -> Self {
        Self::with_idle(Some(IdleSway::breathing()))
    }

    pub fn with_idle(idle: Option<IdleSway>) -> Self {
        Self {
            root_position: Vec3::ZERO,
            root_rotation: Quat::from_rotation_y(PI),
            rotations: [Vec3::ZERO; 6],
            idle,
            expressions: [0.0; 6],
            look_target: None,
            elapsed: 0.0,
        }
    }

    pub fn set_root_position(&mut self, position: Vec3) {
        self.root_position = position;
    }

    pub fn rotation(&self, bone: HumanBone) -> Vec3 {
        self.rotations[bone.index()]
    }

    pub fn expression_weight(&self, face: Face) -> f32 {
        self.expressions[face.index()]
    }

    /// Faces with a non-zero weight.
    pub fn active_expressions(&self) -> Vec<Face> {
        Face::ALL
            .iter()
            .copied()
            .filter(|f| self.expressions[f.index()] > 0.0)
            .collect()
    }

    pub fn look_target(&self) -> Option<Vec3> {
        self.look_target
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for SkeletonAvatar {
    fn default() -> Self {
        Self::new()
    }
}

fn local_rotation(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, euler.y, euler.x, euler.z)
}

impl AvatarModel for SkeletonAvatar {
    fn idle_clip_duration(&self) -> Option<f32> {
        self.idle.as_ref().map(IdleSway::duration)
    }

    fn apply_idle_pose(&mut self, layers: &[PoseLayer]) {
        let total: f32 = layers.iter().map(|l| l.weight).sum();
        let Some(idle) = self.idle.as_ref().filter(|_| total > 0.0) else {
            self.rotations = [Vec3::ZERO; 6];
            return;
        };
        for bone in HumanBone::CHAIN {
            let blended = layers
                .iter()
                .map(|l| idle.sample(bone, l.time) * l.weight)
                .sum::<Vec3>();
            self.rotations[bone.index()] = blended / total;
        }
    }

    fn bone_rotation_mut(&mut self, bone: HumanBone) -> Option<&mut Vec3> {
        Some(&mut self.rotations[bone.index()])
    }

    fn bone_world_position(&self, bone: HumanBone) -> Option<Vec3> {
        let mut position = self.root_position;
        let mut rotation = self.root_rotation;
        for b in HumanBone::CHAIN {
            position += rotation * REST_OFFSETS[b.index()];
            if b == bone {
                return Some(position);
            }
            rotation *= local_rotation(self.rotations[b.index()]);
        }
        None
    }

    fn set_expression_weight(&mut self, face: Face, weight: f32) {
        self.expressions[face.index()] = weight;
    }

    fn set_look_target(&mut self, target: Vec3) {
        self.look_target = Some(target);
    }

    fn update(&mut self, delta: f32) {
        self.elapsed += delta;
    }
}
