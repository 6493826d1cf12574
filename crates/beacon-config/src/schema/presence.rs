//! Presence broadcast configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presence broadcast configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    pub enabled: bool,
    /// Application id handed to the transport on connect.
    pub client_id: String,
    /// Debounce delay applied to every update request (valid range: 0-60000).
    pub update_delay_ms: u32,
    /// Period of the transport callback pump (valid range: 100-60000).
    pub pump_interval_ms: u32,
}

impl PresenceConfig {
    pub fn update_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.update_delay_ms))
    }

    pub fn pump_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.pump_interval_ms))
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            client_id: "beacon".to_string(),
            update_delay_ms: 1000,
            pump_interval_ms: 2000,
        }
    }
}
