//! Per-frame avatar animation: idle looping, expressions and look tracking.

mod engine;
pub mod expression;
pub mod idle;
pub mod look;


pub use engine::AnimationEngine;
pub use expression::ExpressionFader;
pub use idle::IdleLoop;
pub use look::LookTracker;
