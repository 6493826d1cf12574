//! Turning directories on disk into workspace entries.

use std::fs;
use std::path::{Path, PathBuf};

use beacon_workspace::{ResourceEntry, WorkspaceEntry, WorkspaceSettings};

/// Build a workspace for `dir`, keyed by its canonical path, with its
/// top-level files as resources.
pub fn open_directory(dir: &Path) -> beacon_common::Result<WorkspaceEntry> {
    let dir = dir.canonicalize()?;
    let key = dir.to_string_lossy().into_owned();
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| key.clone());

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .collect();
    files.sort();

    let mut entry = WorkspaceEntry::new(key, name, WorkspaceSettings::Inherit);
    for file in files {
        entry.add_resource(ResourceEntry::from_path(file));
    }
    Ok(entry)
}
