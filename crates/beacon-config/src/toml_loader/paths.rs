//! Where the config file lives, and writing the first one.

use std::fs;
use std::path::{Path, PathBuf};

use beacon_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "beacon";
const FILE_NAME: &str = "config.toml";

/// `<config dir>/beacon/config.toml` for the current platform.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|base| config_path_in(&base))
        .ok_or(ConfigError::NoConfigDir)
}

pub(crate) fn config_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR).join(FILE_NAME)
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |at: &Path| {
        let path = at.to_path_buf();
        move |source: std::io::Error| ConfigError::Io { path, source }
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    fs::write(path, default_config_toml()).map_err(io_err(path))?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
