//! Reading config files.

use std::fs;
use std::path::Path;

use beacon_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::BeaconConfig;
use crate::validation;

/// Parse the TOML file at `path`.
///
/// Missing fields take their defaults. Out-of-range values are reported with
/// a warning and kept; callers wanting a hard failure run
/// [`validation::validate`] themselves.
pub fn load_from_path(path: &Path) -> Result<BeaconConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: BeaconConfig = toml::from_str(&text)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "config has out-of-range values");
    }
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the platform default config, writing the template on first run.
pub fn load_default() -> Result<BeaconConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no config yet, creating default");
            create_default_config(&path)?;
            Ok(BeaconConfig::default())
        }
        other => other,
    }
}
