//! Avatar animation and camera framing, ticked once per rendered frame.
//!
//! The [`Scene`] is the renderer-side consumer of bridge commands. Each
//! frame it runs the [`AnimationEngine`] (idle loop, expression fades,
//! look tracking) against an [`AvatarModel`], then moves the camera with
//! the [`CameraRig`].

pub mod animation;
pub mod avatar;
pub mod camera;
pub mod perf;
pub mod scene;

pub use animation::AnimationEngine;
pub use avatar::{AvatarModel, HumanBone, PoseLayer, SkeletonAvatar};
pub use camera::{CameraRig, PerspectiveCamera};
pub use perf::FrameTimer;
pub use scene::Scene;
