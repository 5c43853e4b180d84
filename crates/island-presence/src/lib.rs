//! Presence state machine for the notch surface.
//!
//! Decides whether the companion is compact (`Closed`) or showing the full
//! panel (`Expanded`) from hover, focus-lock and assistant events, and
//! collapses it again after a quiet period. Geometry targets for each
//! state live in [`geometry`]; the machine itself only deals in states.

pub mod geometry;
mod machine;


pub use geometry::SurfaceGeometry;
pub use machine::{PresenceMachine, PresenceState, AUTO_COLLAPSE_DELAY, THINKING_LABEL};
