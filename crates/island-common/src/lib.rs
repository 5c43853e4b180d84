pub mod errors;
pub mod timer;
pub mod types;

pub use errors::{BridgeError, ConfigError, IslandError};
pub use timer::{DeadlineTimer, TimerToken};
pub use types::{AgentState, CameraMode, Face};

pub type Result<T> = std::result::Result<T, IslandError>;
