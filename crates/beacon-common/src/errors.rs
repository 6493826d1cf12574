use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("no platform config directory")]
    NoConfigDir,

    #[error("config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the workspace snapshot model.
///
/// `UnsupportedOperation` is a usage error: it is only produced when code
/// tries to mutate through a read-only view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown workspace: {0}")]
    UnknownWorkspace(String),

    #[error("entry key '{entry_key}' does not match map key '{map_key}'")]
    KeyMismatch { map_key: String, entry_key: String },

    #[error("unsupported operation on read-only view: {0}")]
    UnsupportedOperation(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("transport connect failed: {0}")]
    Connect(String),

    #[error("transport callback failed: {0}")]
    Callback(String),

    #[error("transport publish failed: {0}")]
    Publish(String),

    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("{0}")]
    Other(String),
}
