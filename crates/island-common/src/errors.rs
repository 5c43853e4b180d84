use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error("renderer not ready: {0}")]
    RendererNotReady(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum IslandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("listener error: {0}")]
    Listener(String),

    #[error("{0}")]
    Other(String),
}
