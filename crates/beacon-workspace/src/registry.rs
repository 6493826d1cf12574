//! Live registry of open workspaces.

use std::sync::Arc;

use beacon_common::ModelError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::entry::WorkspaceEntry;
use crate::resource::ResourceEntry;
use crate::settings::WorkspaceSettings;
use crate::view::ReadOnlyView;
use crate::WorkspaceSnapshot;

/// Process-wide store of open workspaces, keyed by workspace key.
///
/// Every mutation takes the write lock for the duration of that mutation
/// only. Snapshots take the read lock for the duration of the copy only, so
/// a consumer never blocks producers while it renders.
#[derive(Default)]
pub struct SnapshotRegistry {
    workspaces: Arc<RwLock<WorkspaceSnapshot>>,
}

impl SnapshotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a workspace, replacing any entry with the same key.
    pub fn add_workspace(
        &self,
        entry: WorkspaceEntry,
    ) -> Result<Option<WorkspaceEntry>, ModelError> {
        entry.check_invariants()?;
        debug!(key = entry.key(), name = entry.name(), "workspace added");
        Ok(self
            .workspaces
            .write()
            .insert(entry.key().to_string(), entry))
    }

    pub fn remove_workspace(&self, key: &str) -> Option<WorkspaceEntry> {
        let removed = self.workspaces.write().remove(key);
        if removed.is_some() {
            debug!(key, "workspace removed");
        }
        removed
    }

    /// Add or replace a resource in a workspace.
    pub fn add_resource(&self, workspace: &str, resource: ResourceEntry) -> Result<(), ModelError> {
        self.update(workspace, |entry| {
            entry.add_resource(resource);
        })
    }

    pub fn remove_resource(
        &self,
        workspace: &str,
        resource: &str,
    ) -> Result<Option<ResourceEntry>, ModelError> {
        self.update(workspace, |entry| entry.remove_resource(resource))
    }

    /// Add a resource if missing and mark the workspace as accessed.
    pub fn touch_resource(
        &self,
        workspace: &str,
        resource: ResourceEntry,
        at: DateTime<Utc>,
    ) -> Result<(), ModelError> {
        self.update(workspace, |entry| {
            if !entry.files().contains_key(resource.key()) {
                entry.add_resource(resource);
            }
            entry.touch(at);
        })
    }

    pub fn touch_workspace(&self, workspace: &str, at: DateTime<Utc>) -> Result<(), ModelError> {
        self.update(workspace, |entry| entry.touch(at))
    }

    pub fn update_settings(
        &self,
        workspace: &str,
        settings: WorkspaceSettings,
    ) -> Result<(), ModelError> {
        self.update(workspace, |entry| entry.set_settings(settings))
    }

    /// Mutate one workspace in place under the write lock.
    pub fn update<R>(
        &self,
        workspace: &str,
        f: impl FnOnce(&mut WorkspaceEntry) -> R,
    ) -> Result<R, ModelError> {
        let mut workspaces = self.workspaces.write();
        let entry = workspaces
            .get_mut(workspace)
            .ok_or_else(|| ModelError::UnknownWorkspace(workspace.to_string()))?;
        Ok(f(entry))
    }

    pub fn get(&self, key: &str) -> Option<WorkspaceEntry> {
        self.workspaces.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.workspaces.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.workspaces.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.read().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.workspaces.read().keys().cloned().collect()
    }

    /// Visit every workspace under the read lock. Keep `f` short.
    pub fn for_each(&self, mut f: impl FnMut(&WorkspaceEntry)) {
        for entry in self.workspaces.read().values() {
            f(entry);
        }
    }

    /// Deep copy of every workspace, taken at a single instant.
    pub fn snapshot_all(&self) -> WorkspaceSnapshot {
        self.workspaces.read().clone()
    }

    /// Deep copy of the named workspaces. Unknown keys are skipped.
    pub fn snapshot_of<'a, I>(&self, keys: I) -> WorkspaceSnapshot
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.workspaces.read().subset(keys)
    }

    pub fn least_recently_accessed(&self) -> Option<WorkspaceEntry> {
        self.workspaces
            .read()
            .values()
            .min_by(|a, b| a.cmp_by_last_access(b))
            .cloned()
    }

    pub fn most_recently_accessed(&self) -> Option<WorkspaceEntry> {
        self.workspaces
            .read()
            .values()
            .max_by(|a, b| a.cmp_by_last_access(b))
            .cloned()
    }

    /// Live, read-only view of the registry.
    pub fn view(&self) -> ReadOnlyView<String, WorkspaceEntry> {
        ReadOnlyView::new(Arc::clone(&self.workspaces))
    }
}

impl std::fmt::Debug for SnapshotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotRegistry")
            .field("workspaces", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn registry_with(keys: &[&str]) -> SnapshotRegistry {
        let registry = SnapshotRegistry::new();
        for key in keys {
            registry
                .add_workspace(WorkspaceEntry::new(*key, *key, WorkspaceSettings::Inherit))
                .unwrap();
        }
        registry
    }

    #[test]
    fn add_and_remove_workspace() {
        let registry = registry_with(&["a", "b"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));

        let removed = registry.remove_workspace("a").unwrap();
        assert_eq!(removed.key(), "a");
        assert!(!registry.contains("a"));
        assert!(registry.remove_workspace("a").is_none());
    }

    #[test]
    fn one_entry_per_workspace_key() {
        let registry = registry_with(&["a"]);
        let previous = registry
            .add_workspace(WorkspaceEntry::new("a", "renamed", WorkspaceSettings::Hidden))
            .unwrap();
        assert_eq!(previous.unwrap().name(), "a");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name(), "renamed");
    }

    #[test]
    fn rejects_entry_with_mismatched_keys() {
        let json = r#"{
            "key": "ws", "name": "ws",
            "opened_at": "2024-01-01T00:00:00Z", "accessed_at": "2024-01-01T00:00:00Z",
            "settings": {"kind": "inherit"},
            "files": {"x": {"key": "y", "name": "f", "path": "/f"}}
        }"#;
        let entry: WorkspaceEntry = serde_json::from_str(json).unwrap();
        let registry = SnapshotRegistry::new();
        assert!(matches!(
            registry.add_workspace(entry),
            Err(ModelError::KeyMismatch { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn resource_operations_require_known_workspace() {
        let registry = registry_with(&["a"]);
        let err = registry
            .add_resource("missing", ResourceEntry::from_path("/f"))
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownWorkspace("missing".into()));

        registry.add_resource("a", ResourceEntry::from_path("/f")).unwrap();
        assert_eq!(registry.get("a").unwrap().files().len(), 1);

        let removed = registry.remove_resource("a", "/f").unwrap();
        assert!(removed.is_some());
        assert!(registry.remove_resource("a", "/f").unwrap().is_none());
        assert!(registry.remove_resource("missing", "/f").is_err());
    }

    #[test]
    fn update_settings_and_touch() {
        let registry = registry_with(&["a"]);
        registry
            .update_settings("a", WorkspaceSettings::Hidden)
            .unwrap();
        assert!(registry.get("a").unwrap().settings().is_hidden());

        let base = registry.get("a").unwrap().accessed();
        registry
            .touch_workspace("a", base + Duration::seconds(3))
            .unwrap();
        registry.touch_workspace("a", base).unwrap();
        assert_eq!(
            registry.get("a").unwrap().accessed(),
            base + Duration::seconds(3)
        );
    }

    #[test]
    fn touch_resource_adds_once() {
        let registry = registry_with(&["a"]);
        let at = Utc::now() + Duration::seconds(1);
        registry
            .touch_resource("a", ResourceEntry::new("/f", "first", "/f"), at)
            .unwrap();
        registry
            .touch_resource("a", ResourceEntry::new("/f", "second", "/f"), at)
            .unwrap();
        let entry = registry.get("a").unwrap();
        assert_eq!(entry.files().len(), 1);
        assert_eq!(entry.files().get("/f").unwrap().name(), "first");
        assert_eq!(entry.accessed(), at);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let registry = registry_with(&["a"]);
        registry.add_resource("a", ResourceEntry::from_path("/one")).unwrap();

        let snapshot = registry.snapshot_all();

        registry.add_resource("a", ResourceEntry::from_path("/two")).unwrap();
        registry.update_settings("a", WorkspaceSettings::Hidden).unwrap();
        registry
            .add_workspace(WorkspaceEntry::new("b", "b", WorkspaceSettings::Inherit))
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        let a = snapshot.get("a").unwrap();
        assert_eq!(a.files().len(), 1);
        assert!(!a.settings().is_hidden());
    }

    #[test]
    fn mutating_snapshot_does_not_touch_registry() {
        let registry = registry_with(&["a"]);
        registry.add_resource("a", ResourceEntry::from_path("/one")).unwrap();

        let mut snapshot = registry.snapshot_all();
        snapshot
            .get_mut("a")
            .unwrap()
            .remove_resource("/one");
        snapshot.remove("a");

        assert_eq!(registry.get("a").unwrap().files().len(), 1);
    }

    #[test]
    fn snapshot_of_subset() {
        let registry = registry_with(&["a", "b", "c"]);
        let snapshot = registry.snapshot_of(["a", "c", "nope"]);
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains_key("a"));
        assert!(snapshot.contains_key("c"));
    }

    #[test]
    fn recency_helpers() {
        let registry = registry_with(&["a", "b", "c"]);
        let now = Utc::now();
        registry.touch_workspace("b", now + Duration::seconds(10)).unwrap();
        registry.touch_workspace("c", now + Duration::seconds(5)).unwrap();
        registry.touch_workspace("a", now + Duration::seconds(1)).unwrap();

        assert_eq!(registry.most_recently_accessed().unwrap().key(), "b");
        assert_eq!(registry.least_recently_accessed().unwrap().key(), "a");
        assert!(SnapshotRegistry::new().most_recently_accessed().is_none());
    }

    #[test]
    fn for_each_visits_all() {
        let registry = registry_with(&["a", "b"]);
        let mut seen = Vec::new();
        registry.for_each(|entry| seen.push(entry.key().to_string()));
        seen.sort();
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn view_is_live_and_read_only() {
        let registry = registry_with(&["a"]);
        let view = registry.view();
        registry
            .add_workspace(WorkspaceEntry::new("b", "b", WorkspaceSettings::Inherit))
            .unwrap();
        assert_eq!(view.len(), 2);
        assert!(view.remove("a").is_err());
        assert!(view.clear().is_err());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn concurrent_snapshot_never_sees_partial_resource() {
        let registry = Arc::new(registry_with(&["ws"]));
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let registry = Arc::clone(&registry);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..500 {
                    let path = format!("/ws/file-{i}.rs");
                    registry
                        .add_resource("ws", ResourceEntry::from_path(&path))
                        .unwrap();
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let mut last_len = 0;
        while !done.load(Ordering::SeqCst) {
            let snapshot = registry.snapshot_all();
            let ws = snapshot.get("ws").unwrap();
            assert!(ws.files().len() >= last_len);
            last_len = ws.files().len();
            for (key, resource) in ws.files() {
                assert_eq!(key, resource.key());
                assert!(resource.name().starts_with("file-"));
                assert_eq!(resource.path().to_string_lossy(), *key);
            }
        }

        writer.join().unwrap();
        assert_eq!(registry.get("ws").unwrap().files().len(), 500);
    }
}
