//! Workspace snapshot model.
//!
//! Tracks open workspaces and their resources in a [`SnapshotRegistry`].
//! Producers mutate the registry in place; consumers take a deep copy with
//! [`SnapshotRegistry::snapshot_all`] and work on it without holding any
//! lock. Every entity owns its data outright, so `Clone` is a deep copy.

pub mod entry;
pub mod map;
pub mod registry;
pub mod resource;
pub mod settings;
pub mod view;

pub use entry::WorkspaceEntry;
pub use map::SnapshotMap;
pub use registry::SnapshotRegistry;
pub use resource::ResourceEntry;
pub use settings::{CustomSettings, WorkspaceSettings};
pub use view::ReadOnlyView;

/// Snapshot of every tracked workspace, keyed by workspace key.
pub type WorkspaceSnapshot = SnapshotMap<String, WorkspaceEntry>;
