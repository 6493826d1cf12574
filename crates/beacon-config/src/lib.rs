//! Beacon configuration.
//!
//! One TOML file with `[presence]`, `[display]` and `[logging]` tables.
//! Every field has a default, so an empty file is a valid config.
//!
//! # Example
//!
//! ```rust,no_run
//! use beacon_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    directives_for, BeaconConfig, DisplayConfig, LogLevel, LoggingConfig, PresenceConfig,
    CONFIG_SCHEMA_VERSION, LOG_TARGETS,
};

use beacon_common::ConfigError;

/// Load and validate the platform default config, creating it if missing.
pub fn load_config() -> Result<BeaconConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit file path.
///
/// Unlike [`load_config`], a missing file is an error rather than a cue to
/// create one.
pub fn load_config_at(path: &std::path::Path) -> Result<BeaconConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &BeaconConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
