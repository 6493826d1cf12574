pub mod errors;

pub use errors::{BeaconError, ConfigError, ModelError, TransportError};

pub type Result<T> = std::result::Result<T, BeaconError>;
