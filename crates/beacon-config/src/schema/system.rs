//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

/// Log targets of the beacon crates. The binary logs as `beacon`.
pub const LOG_TARGETS: &[&str] = &[
    "beacon",
    "beacon_common",
    "beacon_config",
    "beacon_workspace",
    "beacon_presence",
];

impl LogLevel {
    /// Level name as `tracing_subscriber` spells it.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }

    /// One `target=level` filter directive per beacon crate.
    pub fn directives(self) -> Vec<String> {
        directives_for(self.as_filter())
    }
}

/// Filter directives applying `level` to every beacon crate.
pub fn directives_for(level: &str) -> Vec<String> {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
