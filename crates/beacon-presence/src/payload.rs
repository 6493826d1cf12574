//! Presence payload and the default renderer.

use beacon_config::DisplayConfig;
use beacon_workspace::{SnapshotRegistry, WorkspaceEntry, WorkspaceSnapshot};
use serde::{Deserialize, Serialize};

/// What gets broadcast. Compared by value to suppress redundant publishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresencePayload {
    pub details: String,
    pub state: String,
    /// Unix seconds the current activity started, when elapsed time is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,
}

/// Private, point-in-time input to [`render`].
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub workspaces: WorkspaceSnapshot,
    pub display: DisplayConfig,
}

impl RenderContext {
    /// Deep-copy the registry. The registry lock is held only for the copy.
    pub fn capture(registry: &SnapshotRegistry, display: &DisplayConfig) -> Self {
        Self {
            workspaces: registry.snapshot_all(),
            display: display.clone(),
        }
    }

    /// The most recently accessed workspace that is not hidden.
    pub fn active_workspace(&self) -> Option<&WorkspaceEntry> {
        self.workspaces
            .values()
            .filter(|ws| !ws.settings().is_hidden())
            .max_by(|a, b| a.cmp_by_last_access(b).then_with(|| b.key().cmp(a.key())))
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Turn a context into a payload. Pure: equal contexts give equal payloads.
pub fn render(ctx: RenderContext) -> PresencePayload {
    let Some(ws) = ctx.active_workspace() else {
        return PresencePayload {
            details: String::new(),
            state: ctx.display.idle_text.clone(),
            start_timestamp: None,
            large_text: None,
        };
    };

    let settings = ws.settings();
    let details = match settings.description() {
        Some(desc) => desc.to_string(),
        None => format!("Working on {}", ws.name()),
    };

    let state = if settings.show_resources(ctx.display.show_resources) {
        summarize_resources(ws)
    } else {
        String::new()
    };

    let start_timestamp = settings
        .show_elapsed_time(ctx.display.show_elapsed_time)
        .then(|| ws.opened().timestamp());

    PresencePayload {
        details,
        state,
        start_timestamp,
        large_text: Some(ws.name().to_string()),
    }
}

fn summarize_resources(ws: &WorkspaceEntry) -> String {
    let mut names: Vec<&str> = ws.files().values().map(|r| r.name()).collect();
    names.sort_unstable();
    match names.as_slice() {
        [] => "No open files".to_string(),
        [one] => format!("Editing {one}"),
        [first, rest @ ..] => format!("Editing {first} and {} more", rest.len()),
    }
}
