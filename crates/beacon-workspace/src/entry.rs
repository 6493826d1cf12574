//! A tracked workspace and the resources open in it.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use beacon_common::ModelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::map::SnapshotMap;
use crate::resource::ResourceEntry;
use crate::settings::WorkspaceSettings;

/// One open workspace.
///
/// Identity is the key, which stays stable for the lifetime of the
/// workspace. Resources are keyed by their own key, so the map key always
/// equals the entry key when entries are added through this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceEntry {
    key: String,
    name: String,
    opened_at: DateTime<Utc>,
    accessed_at: DateTime<Utc>,
    settings: WorkspaceSettings,
    files: SnapshotMap<String, ResourceEntry>,
}

impl WorkspaceEntry {
    /// New workspace opened now.
    pub fn new(key: impl Into<String>, name: impl Into<String>, settings: WorkspaceSettings) -> Self {
        Self::opened_at(key, name, settings, Utc::now())
    }

    pub fn opened_at(
        key: impl Into<String>,
        name: impl Into<String>,
        settings: WorkspaceSettings,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            opened_at,
            accessed_at: opened_at,
            settings,
            files: SnapshotMap::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opened(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn accessed(&self) -> DateTime<Utc> {
        self.accessed_at
    }

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn files(&self) -> &SnapshotMap<String, ResourceEntry> {
        &self.files
    }

    pub fn set_settings(&mut self, settings: WorkspaceSettings) {
        self.settings = settings;
    }

    /// Record an access. Earlier timestamps are ignored so the access time
    /// never moves backwards.
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.accessed_at {
            self.accessed_at = at;
        }
    }

    /// Add or replace a resource, returning the one it replaced.
    pub fn add_resource(&mut self, resource: ResourceEntry) -> Option<ResourceEntry> {
        self.files.insert(resource.key().to_string(), resource)
    }

    pub fn remove_resource(&mut self, key: &str) -> Option<ResourceEntry> {
        self.files.remove(key)
    }

    /// Check that every resource is stored under its own key.
    ///
    /// Entries built through `add_resource` always pass; deserialized ones
    /// might not.
    pub fn check_invariants(&self) -> Result<(), ModelError> {
        for (map_key, resource) in &self.files {
            if map_key != resource.key() {
                return Err(ModelError::KeyMismatch {
                    map_key: map_key.clone(),
                    entry_key: resource.key().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Order by last access, oldest first.
    pub fn cmp_by_last_access(&self, other: &Self) -> Ordering {
        self.accessed_at.cmp(&other.accessed_at)
    }
}

impl PartialEq for WorkspaceEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for WorkspaceEntry {}

impl Hash for WorkspaceEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
