//! Presence display defaults.

use serde::{Deserialize, Serialize};

/// What the rendered presence shows for workspaces that inherit settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_resources: bool,
    pub show_elapsed_time: bool,
    /// Text shown when no workspace is open or all are hidden.
    pub idle_text: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_resources: true,
            show_elapsed_time: true,
            idle_text: "Idle".to_string(),
        }
    }
}
