//! Configuration schema types for Beacon.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with sensible defaults.

mod display;
mod presence;
mod system;

pub use display::*;
pub use presence::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Beacon.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct BeaconConfig {
    pub presence: PresenceConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_correct_presence() {
        let config = BeaconConfig::default();
        assert!(config.presence.enabled);
        assert_eq!(config.presence.client_id, "beacon");
        assert_eq!(config.presence.update_delay_ms, 1000);
        assert_eq!(config.presence.pump_interval_ms, 2000);
    }

    #[test]
    fn default_config_has_correct_display() {
        let config = BeaconConfig::default();
        assert!(config.display.show_resources);
        assert!(config.display.show_elapsed_time);
        assert_eq!(config.display.idle_text, "Idle");
    }

    #[test]
    fn default_config_has_correct_logging() {
        let config = BeaconConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[presence]
client_id = "1234567890"
"#;
        let config: BeaconConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.presence.client_id, "1234567890");
        assert_eq!(config.presence.update_delay_ms, 1000);
        assert!(config.display.show_resources);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: BeaconConfig = toml::from_str("").unwrap();
        assert_eq!(config.presence.client_id, "beacon");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_parses_uppercase() {
        let config: BeaconConfig = toml::from_str("[logging]\nlevel = \"DEBUG\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn log_level_directives_cover_every_crate() {
        assert_eq!(LogLevel::Warning.as_filter(), "warn");
        let directives = LogLevel::Debug.directives();
        assert_eq!(directives.len(), LOG_TARGETS.len());
        assert!(directives.contains(&"beacon=debug".to_string()));
        assert!(directives.contains(&"beacon_presence=debug".to_string()));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = BeaconConfig::default();
        let text = toml::to_string(&config).unwrap();
        let back: BeaconConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.presence.pump_interval_ms, config.presence.pump_interval_ms);
        assert_eq!(back.display.idle_text, config.display.idle_text);
    }
}
