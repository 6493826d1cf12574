//! Per-workspace presence settings.

use serde::{Deserialize, Serialize};

/// Settings attached to a workspace.
///
/// `Inherit` defers to the global display defaults, `Hidden` keeps the
/// workspace out of the broadcast entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkspaceSettings {
    #[default]
    Inherit,
    Hidden,
    Custom(CustomSettings),
}

/// Explicit overrides for a single workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomSettings {
    /// Replaces the workspace name in the broadcast when set.
    pub description: Option<String>,
    pub show_resources: bool,
    pub show_elapsed_time: bool,
}

impl Default for CustomSettings {
    fn default() -> Self {
        Self {
            description: None,
            show_resources: true,
            show_elapsed_time: true,
        }
    }
}

impl WorkspaceSettings {
    pub fn is_hidden(&self) -> bool {
        matches!(self, WorkspaceSettings::Hidden)
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            WorkspaceSettings::Custom(custom) => custom.description.as_deref(),
            _ => None,
        }
    }

    /// Whether resources should be shown, falling back to `default` when
    /// inheriting.
    pub fn show_resources(&self, default: bool) -> bool {
        match self {
            WorkspaceSettings::Inherit => default,
            WorkspaceSettings::Hidden => false,
            WorkspaceSettings::Custom(custom) => custom.show_resources,
        }
    }

    pub fn show_elapsed_time(&self, default: bool) -> bool {
        match self {
            WorkspaceSettings::Inherit => default,
            WorkspaceSettings::Hidden => false,
            WorkspaceSettings::Custom(custom) => custom.show_elapsed_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherit_uses_defaults() {
        let settings = WorkspaceSettings::Inherit;
        assert!(settings.show_resources(true));
        assert!(!settings.show_resources(false));
        assert!(!settings.show_elapsed_time(false));
        assert_eq!(settings.description(), None);
    }

    #[test]
    fn hidden_shows_nothing() {
        let settings = WorkspaceSettings::Hidden;
        assert!(settings.is_hidden());
        assert!(!settings.show_resources(true));
        assert!(!settings.show_elapsed_time(true));
    }

    #[test]
    fn custom_overrides_defaults() {
        let settings = WorkspaceSettings::Custom(CustomSettings {
            description: Some("Secret project".into()),
            show_resources: false,
            show_elapsed_time: true,
        });
        assert!(!settings.is_hidden());
        assert_eq!(settings.description(), Some("Secret project"));
        assert!(!settings.show_resources(true));
        assert!(settings.show_elapsed_time(false));
    }

    #[test]
    fn clone_is_independent() {
        let original = WorkspaceSettings::Custom(CustomSettings::default());
        let mut copy = original.clone();
        if let WorkspaceSettings::Custom(custom) = &mut copy {
            custom.description = Some("changed".into());
        }
        assert_eq!(original.description(), None);
        assert_eq!(copy.description(), Some("changed"));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&WorkspaceSettings::Hidden).unwrap();
        assert_eq!(json, r#"{"kind":"hidden"}"#);

        let custom: WorkspaceSettings =
            serde_json::from_str(r#"{"kind":"custom","show_resources":false}"#).unwrap();
        assert!(!custom.show_resources(true));
        assert!(custom.show_elapsed_time(false));
    }
}
