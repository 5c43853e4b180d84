//! The avatar model seam and a procedural humanoid implementation.

mod skeleton;
mod types;

pub use skeleton::{IdleSway, SkeletonAvatar};
pub use types::{AvatarModel, HumanBone, PoseLayer};
