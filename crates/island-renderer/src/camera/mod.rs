//! Camera framing for the avatar.

mod rig;

pub use rig::{
    fit_distance, to_vec3, CameraRig, PerspectiveCamera, DEFAULT_LERP_SPEED, FIT_MARGIN, HEAD_DISTANCE,
    HEAD_LIFT, VISUAL_OFFSET_X,
};
